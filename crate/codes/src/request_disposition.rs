use certsrv_codes_derive::{CodeEnumDeserialize, CodeEnumSerialize};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr, VariantArray};

use crate::{
    domain::{CodeDomain, impl_code_conversions},
    error::{CodeError, CodeResult},
};

/// Disposition of a request row in the CA database (`DB_DISP_*`),
/// i.e. the `Request.Disposition` column read through `ICertView`.
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
pub enum RequestDisposition {
    Active = 8,
    Pending = 9,
    Foreign = 12,
    CACert = 15,
    CACertChain = 16,
    KRACert = 17,
    Issued = 20,
    Revoked = 21,
    Error = 30,
    Denied = 31,
}

impl CodeDomain for RequestDisposition {
    const DOMAIN: &'static str = "CertificateRequest.Disposition";

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
            Self::Active => "DB_DISP_ACTIVE",
            Self::Pending => "DB_DISP_PENDING",
            Self::Foreign => "DB_DISP_FOREIGN",
            Self::CACert => "DB_DISP_CA_CERT",
            Self::CACertChain => "DB_DISP_CA_CERT_CHAIN",
            Self::KRACert => "DB_DISP_KRA_CERT",
            Self::Issued => "DB_DISP_ISSUED",
            Self::Revoked => "DB_DISP_REVOKED",
            Self::Error => "DB_DISP_ERROR",
            Self::Denied => "DB_DISP_DENIED",
        }
    }

    fn lookup_value(value: u32) -> CodeResult<Self> {
        Self::from_repr(value).ok_or(CodeError::UnrecognizedValue {
            domain: Self::DOMAIN,
            value: value.into(),
        })
    }
}

impl_code_conversions!(RequestDisposition);
