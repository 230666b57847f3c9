mod console;

pub use console::ConsoleChannel;
