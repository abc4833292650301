use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::api::value::*;
use crate::constant::NAME_DELIMITER;

fn convert<T: FromStr>(raw: &str) -> Result<T, ConversionError> {
    T::from_str(raw).map_err(|_| ConversionError::invalid::<T>(raw))
}

macro_rules! from_str_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl FlagValue for $t {
                fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
                    *self = convert::<$t>(raw)?;
                    Ok(())
                }

                fn display(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

from_str_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char
);

impl FlagValue for bool {
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        *self = match raw {
            // Present without a value.
            "" => true,
            "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
            "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
            _ => return Err(ConversionError::invalid::<bool>(raw)),
        };
        Ok(())
    }

    fn display(&self) -> String {
        self.to_string()
    }
}

impl FlagValue for String {
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        raw.clone_into(self);
        Ok(())
    }

    fn display(&self) -> String {
        self.clone()
    }
}

impl FlagValue for PathBuf {
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        *self = PathBuf::from(raw);
        Ok(())
    }

    fn display(&self) -> String {
        Path::display(self).to_string()
    }
}

/// Each occurrence appends; a single value may carry several comma separated items.
impl<T> FlagValue for Vec<T>
where
    T: FromStr + Display,
{
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        if raw.is_empty() {
            return Ok(());
        }

        let items = raw
            .split(NAME_DELIMITER)
            .map(convert::<T>)
            .collect::<Result<Vec<T>, _>>()?;
        self.extend(items);
        Ok(())
    }

    fn display(&self) -> String {
        self.iter()
            .map(|item| item.to_string())
            .collect::<Vec<String>>()
            .join(",")
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl<T> FlagValue for Option<T>
where
    T: FromStr + Display,
{
    fn set(&mut self, raw: &str) -> Result<(), ConversionError> {
        self.replace(convert::<T>(raw)?);
        Ok(())
    }

    fn display(&self) -> String {
        match self {
            Some(inner) => inner.to_string(),
            None => String::default(),
        }
    }
}
