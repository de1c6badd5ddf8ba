use certsrv_codes_derive::{CodeEnumDeserialize, CodeEnumSerialize};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr, VariantArray};

use crate::{
    domain::{CodeDomain, impl_code_conversions},
    error::{CodeError, CodeResult},
};

/// Disposition returned by the CA for a `Submit`, `RetrievePending` or
/// `GetLastStatus` call (`CR_DISP_*`).
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
pub enum CaResponseDisposition {
    /// The request did not complete.
    Incomplete = 0,
    /// The request failed.
    Error = 1,
    /// The request was denied.
    Denied = 2,
    /// The certificate was issued.
    Issued = 3,
    /// The certificate was issued separately.
    IssuedOutOfBand = 4,
    /// The request was taken under submission, pending approval.
    UnderSubmission = 5,
    /// The certificate has been revoked.
    Revoked = 6,
}

impl CodeDomain for CaResponseDisposition {
    const DOMAIN: &'static str = "CAResponse.Disposition";

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
            Self::Incomplete => "CR_DISP_INCOMPLETE",
            Self::Error => "CR_DISP_ERROR",
            Self::Denied => "CR_DISP_DENIED",
            Self::Issued => "CR_DISP_ISSUED",
            Self::IssuedOutOfBand => "CR_DISP_ISSUED_OUT_OF_BAND",
            Self::UnderSubmission => "CR_DISP_UNDER_SUBMISSION",
            Self::Revoked => "CR_DISP_REVOKED",
        }
    }

    fn lookup_value(value: u32) -> CodeResult<Self> {
        Self::from_repr(value).ok_or(CodeError::UnrecognizedValue {
            domain: Self::DOMAIN,
            value: value.into(),
        })
    }
}

impl_code_conversions!(CaResponseDisposition);
