pub mod message;
pub mod summary;
pub mod table;

pub const DEFAULT_WIDTH: u16 = 80;
pub const COLUMN_GAP: usize = 2;
pub const END_PADDING: usize = 1;
pub const MESSAGE_PADDING: usize = 3;

pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0)
        .unwrap_or(DEFAULT_WIDTH) as usize
}
