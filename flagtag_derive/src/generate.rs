mod field;
mod flags;
