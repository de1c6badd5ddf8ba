use std::fmt::{self, Debug, Display};

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{CodeError, CodeResult};

/// A closed set of named integer codes defined by the certificate services
/// protocol.
///
/// Values are wire identifiers: they must match the CA bit for bit and are
/// never renumbered. Each domain is independent, comparing a member of one
/// domain with the value of another is meaningless.
pub trait CodeDomain: Copy + Eq + Debug + Send + Sync + 'static {
    /// Label of the domain, used in errors and logs.
    const DOMAIN: &'static str;

    /// Every member of the domain, in ascending value order.
    fn members() -> &'static [Self];

    /// The protocol integer.
    fn value(self) -> u32;

    /// The canonical symbolic name.
    fn name(self) -> &'static str;

    /// The name used by the Windows certificate services headers.
    fn windows_name(self) -> &'static str;

    /// Find a member by its canonical or Windows name.
    ///
    /// # Errors
    ///
    /// `CodeError::UnknownSymbol` if the name is not a member of the domain.
    fn lookup_name(name: &str) -> CodeResult<Self> {
        let found = Self::members()
            .iter()
            .copied()
            .find(|member| member.name() == name || member.windows_name() == name);
        trace!(domain = Self::DOMAIN, name, ?found, "lookup by name");
        found.ok_or_else(|| CodeError::UnknownSymbol {
            domain: Self::DOMAIN,
            name: name.to_owned(),
        })
    }

    /// Find a member by its protocol integer.
    ///
    /// # Errors
    ///
    /// `CodeError::UnrecognizedValue` if no member carries that value.
    fn lookup_value(value: u32) -> CodeResult<Self> {
        Self::members()
            .iter()
            .copied()
            .find(|member| member.value() == value)
            .ok_or(CodeError::UnrecognizedValue {
                domain: Self::DOMAIN,
                value: value.into(),
            })
    }
}

/// Result of decoding an integer received from a CA.
///
/// Unlike `CodeDomain::lookup_value`, decoding never fails: a value outside
/// the known set is kept as `Unrecognized` so that it can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoded<T> {
    Known(T),
    Unrecognized(u32),
}

impl<T: CodeDomain> Decoded<T> {
    #[must_use]
    pub fn from_value(value: u32) -> Self {
        match T::lookup_value(value) {
            Ok(member) => Self::Known(member),
            Err(e) => {
                debug!("{e}");
                Self::Unrecognized(value)
            }
        }
    }

    /// Decode a signed `LONG` as returned by the COM interfaces.
    /// The bit pattern is kept as is.
    #[must_use]
    pub fn from_i32(value: i32) -> Self {
        Self::from_value(u32::from_ne_bytes(value.to_ne_bytes()))
    }

    /// The raw integer, known or not.
    #[must_use]
    pub fn value(self) -> u32 {
        match self {
            Self::Known(member) => member.value(),
            Self::Unrecognized(value) => value,
        }
    }

    #[must_use]
    pub fn known(self) -> Option<T> {
        match self {
            Self::Known(member) => Some(member),
            Self::Unrecognized(_) => None,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl<T: CodeDomain> From<T> for Decoded<T> {
    fn from(member: T) -> Self {
        Self::Known(member)
    }
}

impl<T: CodeDomain> Display for Decoded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(member) => write!(f, "{}", member.name()),
            Self::Unrecognized(value) => write!(f, "Unrecognized({value})"),
        }
    }
}

impl<T: CodeDomain + Serialize> Serialize for Decoded<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Known(member) => member.serialize(serializer),
            Self::Unrecognized(value) => serializer.serialize_u32(*value),
        }
    }
}

/// Implement the conversions shared by every code enum on top of
/// `CodeDomain`: `FromStr`, `TryFrom<&str>`, `TryFrom<u32>`, `TryFrom<i32>`
/// and `From<Self> for u32`.
macro_rules! impl_code_conversions {
    ($name:ident) => {
        impl ::std::str::FromStr for $name {
            type Err = $crate::error::CodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::domain::CodeDomain>::lookup_name(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = $crate::error::CodeError;

            fn try_from(name: &str) -> Result<Self, $crate::error::CodeError> {
                <Self as $crate::domain::CodeDomain>::lookup_name(name)
            }
        }

        impl TryFrom<u32> for $name {
            type Error = $crate::error::CodeError;

            fn try_from(value: u32) -> Result<Self, $crate::error::CodeError> {
                <Self as $crate::domain::CodeDomain>::lookup_value(value)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::error::CodeError;

            fn try_from(value: i32) -> Result<Self, $crate::error::CodeError> {
                let unsigned = u32::try_from(value).map_err(|_e| {
                    $crate::error::CodeError::UnrecognizedValue {
                        domain: <Self as $crate::domain::CodeDomain>::DOMAIN,
                        value: value.into(),
                    }
                })?;
                <Self as $crate::domain::CodeDomain>::lookup_value(unsigned)
            }
        }

        impl From<$name> for u32 {
            fn from(member: $name) -> Self {
                member as Self
            }
        }
    };
}

pub(crate) use impl_code_conversions;
