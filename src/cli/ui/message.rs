use ansi_term::{Color, Style};
use rbac_console::console::notice::{Notice, NoticeLevel};

use crate::ui::MESSAGE_PADDING;

pub fn message_info(message: impl AsRef<str>) {
    let padding = "█".repeat(MESSAGE_PADDING) + " ";
    print!("{}", Style::new().fg(Color::Blue).bold().paint(padding));
    println!("{}", message.as_ref())
}

pub fn message_detail(message: impl AsRef<str>) {
    let padding = "█".repeat(MESSAGE_PADDING) + " ";
    print!("{}", Style::new().fg(Color::Purple).bold().paint(padding));
    println!("{}", Style::new().bold().paint(message.as_ref()))
}

pub fn message_success(message: impl AsRef<str>) {
    let padding = "█".repeat(MESSAGE_PADDING) + " ";
    print!("{}", Style::new().fg(Color::Green).bold().paint(padding));
    println!("{}", message.as_ref())
}

pub fn message_error(message: impl AsRef<str>) {
    let padding = "error: ";
    eprint!("{}", Style::new().fg(Color::Red).bold().paint(padding));
    eprintln!("{}", message.as_ref())
}

pub fn message_warn(message: impl AsRef<str>) {
    let padding = "warning: ";
    eprint!("{}", Style::new().fg(Color::Yellow).bold().paint(padding));
    eprintln!("{}", message.as_ref())
}

pub fn message_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => message_success(&notice.text),
        NoticeLevel::Warning => message_warn(&notice.text),
        NoticeLevel::Error => message_error(&notice.text),
    }
}
