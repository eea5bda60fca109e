mod helper;

pub use helper::LineHelper;
