//! Value conversion service.
//!
//! Key-bridging adapters turn keys of one type into keys of another through
//! [`ConvertFrom`]. Every conversion must be pure: the same input always
//! yields the same output and nothing else happens. Adapters rely on that
//! because they never cache converted keys.

use std::fmt::Debug;

use crate::{Error, Value};

/// Types that can serve as store keys.
///
/// This is also the bound a [`GenericInvoker`](crate::GenericInvoker) sees on
/// the type it is instantiated with.
pub trait Key: Clone + Debug + PartialEq + 'static {}

impl<T: Clone + Debug + PartialEq + 'static> Key for T {}

/// Fallible, pure conversion from `S`.
pub trait ConvertFrom<S: ?Sized>: Sized {
    fn convert_from(value: &S) -> Result<Self, Error>;
}

/// Convert `value` to `T`.
///
/// ```rust
/// use structrw_core::convert;
///
/// let ordinal: usize = convert(&"3".to_string()).unwrap();
/// assert_eq!(ordinal, 3);
/// assert!(convert::<usize, _>(&"three".to_string()).is_err());
/// ```
pub fn convert<T, S>(value: &S) -> Result<T, Error>
where
    T: ConvertFrom<S>,
    S: ?Sized,
{
    T::convert_from(value)
}

impl<T: Clone> ConvertFrom<T> for T {
    fn convert_from(value: &T) -> Result<Self, Error> {
        Ok(value.clone())
    }
}

/// Range-checked conversions between integer key types.
macro_rules! integer_conversions {
    ($from:ty => $($to:ty),+) => {
        $(
            impl ConvertFrom<$from> for $to {
                fn convert_from(value: &$from) -> Result<Self, Error> {
                    <$to>::try_from(*value)
                        .map_err(|e| Error::conversion::<$from, $to>(format!("{}: {}", value, e)))
                }
            }
        )+
    };
}

integer_conversions!(usize => u32, u64, i32, i64);
integer_conversions!(u32 => usize, u64, i32, i64);
integer_conversions!(u64 => usize, u32, i32, i64);
integer_conversions!(i32 => usize, u32, u64, i64);
integer_conversions!(i64 => usize, u32, u64, i32);

/// Text <-> integer conversions (format / parse) and `Value` <-> integer.
macro_rules! text_and_value_conversions {
    ($($int:ty),+) => {
        $(
            impl ConvertFrom<$int> for String {
                fn convert_from(value: &$int) -> Result<Self, Error> {
                    Ok(value.to_string())
                }
            }

            impl ConvertFrom<String> for $int {
                fn convert_from(value: &String) -> Result<Self, Error> {
                    value
                        .parse::<$int>()
                        .map_err(|e| Error::conversion::<String, $int>(format!("{:?}: {}", value, e)))
                }
            }

            impl ConvertFrom<str> for $int {
                fn convert_from(value: &str) -> Result<Self, Error> {
                    value
                        .parse::<$int>()
                        .map_err(|e| Error::conversion::<str, $int>(format!("{:?}: {}", value, e)))
                }
            }

            impl ConvertFrom<$int> for Value {
                fn convert_from(value: &$int) -> Result<Self, Error> {
                    i64::try_from(*value)
                        .map(Value::Integer)
                        .map_err(|e| Error::conversion::<$int, Value>(format!("{}: {}", value, e)))
                }
            }

            impl ConvertFrom<Value> for $int {
                fn convert_from(value: &Value) -> Result<Self, Error> {
                    match value {
                        Value::Integer(i) => <$int>::try_from(*i).map_err(|e| {
                            Error::conversion::<Value, $int>(format!("{}: {}", i, e))
                        }),
                        Value::String(s) => convert(s),
                        other => Err(Error::conversion::<Value, $int>(format!(
                            "cannot use a {} value as an integer key",
                            other.kind()
                        ))),
                    }
                }
            }
        )+
    };
}

text_and_value_conversions!(usize, u32, u64, i32);

// i64 is the native integer of `Value`, so its `Value` conversions are direct.

impl ConvertFrom<i64> for String {
    fn convert_from(value: &i64) -> Result<Self, Error> {
        Ok(value.to_string())
    }
}

impl ConvertFrom<String> for i64 {
    fn convert_from(value: &String) -> Result<Self, Error> {
        value
            .parse::<i64>()
            .map_err(|e| Error::conversion::<String, i64>(format!("{:?}: {}", value, e)))
    }
}

impl ConvertFrom<str> for i64 {
    fn convert_from(value: &str) -> Result<Self, Error> {
        value
            .parse::<i64>()
            .map_err(|e| Error::conversion::<str, i64>(format!("{:?}: {}", value, e)))
    }
}

impl ConvertFrom<i64> for Value {
    fn convert_from(value: &i64) -> Result<Self, Error> {
        Ok(Value::Integer(*value))
    }
}

impl ConvertFrom<Value> for i64 {
    fn convert_from(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Integer(i) => Ok(*i),
            Value::String(s) => convert(s),
            other => Err(Error::conversion::<Value, i64>(format!(
                "cannot use a {} value as an integer key",
                other.kind()
            ))),
        }
    }
}

impl ConvertFrom<str> for String {
    fn convert_from(value: &str) -> Result<Self, Error> {
        Ok(value.to_string())
    }
}

impl ConvertFrom<String> for Value {
    fn convert_from(value: &String) -> Result<Self, Error> {
        Ok(Value::String(value.clone()))
    }
}

impl ConvertFrom<Value> for String {
    fn convert_from(value: &Value) -> Result<Self, Error> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Integer(i) => Ok(i.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(Error::conversion::<Value, String>(format!(
                "cannot use a {} value as a text key",
                other.kind()
            ))),
        }
    }
}

impl ConvertFrom<bool> for String {
    fn convert_from(value: &bool) -> Result<Self, Error> {
        Ok(value.to_string())
    }
}

impl ConvertFrom<String> for bool {
    fn convert_from(value: &String) -> Result<Self, Error> {
        value
            .parse::<bool>()
            .map_err(|e| Error::conversion::<String, bool>(format!("{:?}: {}", value, e)))
    }
}
