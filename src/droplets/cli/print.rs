use colored::Colorize;
use droplets::api::{CmdMessage, MessageLevel};
use droplets::listing::render_table;
use droplets::model::Droplet;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_droplets(droplets: &[Droplet]) {
    let mut lines = render_table(droplets).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for line in lines {
        println!("{}", line);
    }
}
