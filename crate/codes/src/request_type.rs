// see RequestFlags
#![allow(non_upper_case_globals)]

use std::fmt;

use certsrv_codes_derive::{CodeEnumDeserialize, CodeEnumSerialize};
use serde::{
    Deserialize, Serialize,
    de::{self, Visitor},
};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr, VariantArray};

use crate::{
    domain::{CodeDomain, Decoded, impl_code_conversions},
    error::{CodeError, CodeResult},
};

/// The field of the request flags holding the request format
/// (`CR_IN_FORMATMASK`).
pub const FORMAT_MASK: u32 = 0x0000_FF00;

/// The bits of the request flags that modify how the request is handled,
/// outside the format field.
pub const MODIFIER_MASK: u32 = 0x000E_0000;

/// A single request type flag (`CR_IN_*`), as passed in the `Flags`
/// argument of `ICertRequest::Submit`.
///
/// `FormatAny` .. `CMC` are values of the format field, not independent
/// bits: `PKCS7` is `PKCS10 | KeyGen`. `RPC`, `FullResponse` and `CRLs`
/// are modifiers combined with one format. Use `RequestFlags` to compose
/// them.
#[derive(
    CodeEnumSerialize,
    CodeEnumDeserialize,
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Display,
    EnumIter,
    FromRepr,
    IntoStaticStr,
    VariantArray,
)]
#[repr(u32)]
pub enum RequestType {
    /// Let the CA detect the format.
    FormatAny = 0x0000_0000,
    /// PKCS #10 request.
    PKCS10 = 0x0000_0100,
    /// Netscape KEYGEN request.
    KeyGen = 0x0000_0200,
    /// PKCS #7 request.
    PKCS7 = 0x0000_0300,
    /// Certificate Management over CMS request.
    CMC = 0x0000_0400,
    /// Submit over RPC instead of DCOM.
    RPC = 0x0002_0000,
    /// Return the full CMC response.
    FullResponse = 0x0004_0000,
    /// Include the CRLs in the response.
    CRLs = 0x0008_0000,
}

impl RequestType {
    /// Whether this member is a value of the format field.
    #[must_use]
    pub const fn is_format(self) -> bool {
        (self as u32) & !FORMAT_MASK == 0
    }
}

impl CodeDomain for RequestType {
    const DOMAIN: &'static str = "CertificateRequest.RequestType";

    fn members() -> &'static [Self] {
        Self::VARIANTS
    }

    fn value(self) -> u32 {
        self as u32
    }

    fn name(self) -> &'static str {
        self.into()
    }

    fn windows_name(self) -> &'static str {
        match self {
            Self::FormatAny => "CR_IN_FORMATANY",
            Self::PKCS10 => "CR_IN_PKCS10",
            Self::KeyGen => "CR_IN_KEYGEN",
            Self::PKCS7 => "CR_IN_PKCS7",
            Self::CMC => "CR_IN_CMC",
            Self::RPC => "CR_IN_RPC",
            Self::FullResponse => "CR_IN_FULLRESPONSE",
            Self::CRLs => "CR_IN_CRLS",
        }
    }

    fn lookup_value(value: u32) -> CodeResult<Self> {
        Self::from_repr(value).ok_or(CodeError::UnrecognizedValue {
            domain: Self::DOMAIN,
            value: value.into(),
        })
    }
}

impl_code_conversions!(RequestType);

/// A composed request type: one format value plus any number of modifiers.
///
/// `contains` is a plain bitwise test. Because format values overlap at the
/// bit level (`PKCS7` contains `PKCS10`), use `format` or `has` to ask which
/// format a value carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct RequestFlags(u32);

bitflags::bitflags! {
    impl RequestFlags: u32 {
        const FormatAny=0x0000_0000;
        const PKCS10=0x0000_0100;
        const KeyGen=0x0000_0200;
        const PKCS7=0x0000_0300;
        const CMC=0x0000_0400;
        const RPC=0x0002_0000;
        const FullResponse=0x0004_0000;
        const CRLs=0x0008_0000;
    }
}

impl RequestFlags {
    /// The format field, decoded. Values that are not a known format,
    /// e.g. `PKCS10 | CMC`, are `Unrecognized`.
    #[must_use]
    pub fn format(self) -> Decoded<RequestType> {
        Decoded::from_value(self.bits() & FORMAT_MASK)
    }

    /// Replace the format field, keeping every other bit.
    ///
    /// # Errors
    ///
    /// `CodeError::NotAFormat` if `format` is a modifier such as `RPC`.
    pub fn with_format(self, format: RequestType) -> CodeResult<Self> {
        if !format.is_format() {
            return Err(CodeError::NotAFormat {
                domain: RequestType::DOMAIN,
                name: format.name(),
            })
        }
        Ok(Self::from_bits_retain(
            (self.bits() & !FORMAT_MASK) | format as u32,
        ))
    }

    /// The modifier members set in these flags, in value order.
    pub fn modifiers(self) -> impl Iterator<Item = RequestType> {
        RequestType::members()
            .iter()
            .copied()
            .filter(move |member| !member.is_format() && self.contains(Self::from(*member)))
    }

    /// Exact membership: a format member matches only the format field as a
    /// whole, a modifier matches its own bit.
    #[must_use]
    pub fn has(self, member: RequestType) -> bool {
        if member.is_format() {
            self.format() == Decoded::Known(member)
        } else {
            self.contains(Self::from(member))
        }
    }

    /// Bits set outside the format field and the known modifiers.
    #[must_use]
    pub const fn unknown_bits(self) -> u32 {
        self.bits() & !(FORMAT_MASK | MODIFIER_MASK)
    }

    /// Parse a `|` separated list of member names (canonical or Windows)
    /// and integers (decimal or `0x` hexadecimal), as printed by `Display`.
    ///
    /// # Errors
    ///
    /// `CodeError::UnknownSymbol` for a token that is neither a member name
    /// nor an integer.
    pub fn parse_flags(s: &str) -> CodeResult<Self> {
        let mut flags = Self::empty();
        for token in s.split('|').map(str::trim) {
            if let Some(bits) = parse_u32(token) {
                flags |= Self::from_bits_retain(bits);
            } else {
                flags |= Self::from(RequestType::lookup_name(token)?);
            }
        }
        Ok(flags)
    }
}

/// Parse a decimal or `0x` prefixed hexadecimal integer.
#[must_use]
pub fn parse_u32(s: &str) -> Option<u32> {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .map_or_else(|| s.parse().ok(), |hex| u32::from_str_radix(hex, 16).ok())
}

impl From<RequestType> for RequestFlags {
    fn from(member: RequestType) -> Self {
        Self::from_bits_retain(member as u32)
    }
}

impl std::str::FromStr for RequestFlags {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_flags(s)
    }
}

impl fmt::Display for RequestFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Decoded::Known(format) => write!(f, "{}", format.name())?,
            Decoded::Unrecognized(bits) => write!(f, "{bits:#x}")?,
        }
        for modifier in self.modifiers() {
            write!(f, " | {}", modifier.name())?;
        }
        let unknown = self.unknown_bits();
        if unknown != 0 {
            write!(f, " | {unknown:#x}")?;
        }
        Ok(())
    }
}

impl Serialize for RequestFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for RequestFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RequestFlagsVisitor;

        impl Visitor<'_> for RequestFlagsVisitor {
            type Value = RequestFlags;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("struct RequestFlags")
            }

            fn visit_u32<E>(self, v: u32) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RequestFlags::from_bits_retain(v))
            }

            // a LONG returned by the COM interfaces
            fn visit_i32<E>(self, v: i32) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RequestFlags::from_bits_retain(
                    u32::try_from(v).map_err(de::Error::custom)?,
                ))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RequestFlags::from_bits_retain(
                    u32::try_from(v).map_err(de::Error::custom)?,
                ))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(RequestFlags::from_bits_retain(
                    u32::try_from(v).map_err(de::Error::custom)?,
                ))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                RequestFlags::parse_flags(v).map_err(de::Error::custom)
            }
        }
        deserializer.deserialize_any(RequestFlagsVisitor)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use certsrv_logger::log_init;
    use strum::IntoEnumIterator;

    use super::{RequestFlags, RequestType, parse_u32};
    use crate::{CodeDomain, CodeError, Decoded};

    #[test]
    fn test_compose_and_contains() {
        log_init(option_env!("RUST_LOG"));
        let flags = RequestFlags::PKCS10 | RequestFlags::CMC;
        assert_eq!(1280, flags.bits());
        assert!(flags.contains(RequestFlags::CMC));
        assert!(!flags.contains(RequestFlags::KeyGen));

        let flags = RequestFlags::PKCS10 | RequestFlags::RPC;
        assert_eq!(131_328, flags.bits());
        assert!(flags.contains(RequestFlags::RPC));
        assert!(!flags.contains(RequestFlags::FullResponse));
    }

    #[test]
    fn test_format_field() {
        let flags = RequestFlags::PKCS7 | RequestFlags::FullResponse | RequestFlags::CRLs;
        assert_eq!(Decoded::Known(RequestType::PKCS7), flags.format());
        // bitwise, PKCS7 carries the PKCS10 bit
        assert!(flags.contains(RequestFlags::PKCS10));
        assert!(!flags.has(RequestType::PKCS10));
        assert!(flags.has(RequestType::PKCS7));
        assert!(flags.has(RequestType::CRLs));
        assert!(!flags.has(RequestType::RPC));
        assert_eq!(
            vec![RequestType::FullResponse, RequestType::CRLs],
            flags.modifiers().collect::<Vec<_>>()
        );

        let flags = flags.with_format(RequestType::CMC).unwrap();
        assert_eq!(Decoded::Known(RequestType::CMC), flags.format());
        assert!(flags.has(RequestType::FullResponse));
        assert!(flags.has(RequestType::CRLs));

        assert_eq!(
            Decoded::Known(RequestType::FormatAny),
            RequestFlags::RPC.format()
        );
        assert_eq!(
            Decoded::Unrecognized(0x500),
            (RequestFlags::PKCS10 | RequestFlags::CMC).format()
        );
    }

    #[test]
    fn test_with_format_rejects_modifiers() {
        let flags = RequestFlags::PKCS10 | RequestFlags::CRLs;
        assert_eq!(
            flags.with_format(RequestType::RPC),
            Err(CodeError::NotAFormat {
                domain: "CertificateRequest.RequestType",
                name: "RPC",
            })
        );
        // format and modifiers are left untouched
        assert_eq!("PKCS10 | CRLs", flags.to_string());
        assert_eq!(
            RequestFlags::CRLs,
            flags.with_format(RequestType::FormatAny).unwrap()
        );
    }

    #[test]
    fn test_members() {
        let values: HashSet<u32> = RequestType::iter().map(CodeDomain::value).collect();
        assert_eq!(8, values.len());
        for member in RequestType::iter() {
            assert_eq!(member, RequestType::lookup_name(member.name()).unwrap());
            assert_eq!(
                member,
                RequestType::lookup_name(member.windows_name()).unwrap()
            );
            assert_eq!(member, RequestType::lookup_value(member.value()).unwrap());
            assert_eq!(member.value(), RequestFlags::from(member).bits());
        }
        let formats: Vec<RequestType> = RequestType::iter().filter(|m| m.is_format()).collect();
        assert_eq!(
            vec![
                RequestType::FormatAny,
                RequestType::PKCS10,
                RequestType::KeyGen,
                RequestType::PKCS7,
                RequestType::CMC
            ],
            formats
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(
            RequestType::lookup_value(999),
            Err(CodeError::UnrecognizedValue {
                domain: "CertificateRequest.RequestType",
                value: 999,
            })
        );
        // a composed value is not a single member
        assert!(RequestType::try_from(1280_u32).is_err());
        assert!(RequestType::lookup_name("PKCS12").is_err());
    }

    #[test]
    fn test_display_and_parse() {
        let flags = RequestFlags::PKCS10 | RequestFlags::RPC;
        assert_eq!("PKCS10 | RPC", flags.to_string());
        assert_eq!(flags, "PKCS10 | RPC".parse::<RequestFlags>().unwrap());
        assert_eq!(flags, "CR_IN_PKCS10|CR_IN_RPC".parse::<RequestFlags>().unwrap());
        assert_eq!(flags, "0x100 | 131072".parse::<RequestFlags>().unwrap());
        assert_eq!("FormatAny", RequestFlags::empty().to_string());
        assert_eq!(
            "0x500 | CRLs | 0x1",
            (RequestFlags::PKCS10 | RequestFlags::CMC | RequestFlags::CRLs)
                .union(RequestFlags::from_bits_retain(1))
                .to_string()
        );
        let err = RequestFlags::parse_flags("PKCS10 | Bogus").unwrap_err();
        assert_eq!(
            err,
            CodeError::UnknownSymbol {
                domain: "CertificateRequest.RequestType",
                name: "Bogus".to_owned(),
            }
        );
    }

    #[test]
    fn test_parse_u32() {
        assert_eq!(Some(256), parse_u32("256"));
        assert_eq!(Some(256), parse_u32("0x100"));
        assert_eq!(Some(256), parse_u32("0X100"));
        assert_eq!(None, parse_u32("-1"));
        assert_eq!(None, parse_u32("PKCS10"));
    }

    #[test]
    fn test_json() {
        let flags = RequestFlags::CMC | RequestFlags::FullResponse;
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!("263168", json);
        let rec: RequestFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(flags, rec);
        let rec: RequestFlags = serde_json::from_str(r#""CMC | FullResponse""#).unwrap();
        assert_eq!(flags, rec);
        assert!(serde_json::from_str::<RequestFlags>("-1").is_err());

        assert_eq!(r#""KeyGen""#, serde_json::to_string(&RequestType::KeyGen).unwrap());
        let err = serde_json::from_str::<RequestType>("-1").unwrap_err();
        assert!(
            err.to_string()
                .contains("Unrecognized value in CertificateRequest.RequestType: -1")
        );
    }
}
