use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

/// Serialize a code enum variant with both the variant name and value.
/// The name is what self-describing formats such as JSON emit, the value is
/// the integer the certificate authority puts on the wire.
///
/// # Usage
/// ```Rust
/// #[derive(CodeEnumSerialize, Copy, Clone, strum::IntoStaticStr)]
/// #[repr(u32)]
/// pub enum CaResponseDisposition {
///   Incomplete = 0,
///   Error = 1,
/// }
/// ```
/// Please note that:
/// - The enum must derive `Copy` and `strum::IntoStaticStr` in addition to `CodeEnumSerialize`.
/// - The enum must be `repr(u32)`.
///
/// # Explanation
///
/// The default `Serialize` implementation only keeps the variant name and
/// uses the variant index (a counter starting at 0) as the value, which is
/// wrong as soon as the codes are sparse (8, 9, 12, ...).
///
/// `CodeEnumSerialize` passes:
/// 1. the variant name, as a static string obtained through `strum::IntoStaticStr`,
/// 2. the discriminant, obtained with `*self as u32`, in lieu of the index.
#[proc_macro_derive(CodeEnumSerialize)]
pub fn code_enum_serialize_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let expanded = quote! {
        impl ::serde::Serialize for #name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                let variant_name: &'static str = self.into();
                let variant_value: u32 = *self as u32;
                serializer.serialize_unit_variant(stringify!(#name), variant_value, variant_name)
            }
        }
    };

    TokenStream::from(expanded)
}

/// Deserialize a code enum from either its name or its integer value.
///
/// The enum must implement `TryFrom<&str>`, `TryFrom<u32>` and `TryFrom<i32>`
/// with an error type implementing `Display`. Names come from self-describing formats
/// (JSON strings), integers come from raw CA responses.
#[proc_macro_derive(CodeEnumDeserialize)]
pub fn code_enum_deserialize_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let expanded = quote! {
        impl<'de> ::serde::Deserialize<'de> for #name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                struct CodeVisitor;

                impl ::serde::de::Visitor<'_> for CodeVisitor {
                    type Value = #name;

                    fn expecting(
                        &self,
                        formatter: &mut ::core::fmt::Formatter,
                    ) -> ::core::fmt::Result {
                        formatter.write_str(concat!("a ", stringify!(#name), " name or value"))
                    }

                    fn visit_str<E>(self, v: &str) -> ::core::result::Result<Self::Value, E>
                    where
                        E: ::serde::de::Error,
                    {
                        <#name as ::core::convert::TryFrom<&str>>::try_from(v)
                            .map_err(::serde::de::Error::custom)
                    }

                    fn visit_u64<E>(self, v: u64) -> ::core::result::Result<Self::Value, E>
                    where
                        E: ::serde::de::Error,
                    {
                        let v = u32::try_from(v).map_err(::serde::de::Error::custom)?;
                        <#name as ::core::convert::TryFrom<u32>>::try_from(v)
                            .map_err(::serde::de::Error::custom)
                    }

                    // negative LONGs are reported as unrecognized values of the domain
                    fn visit_i64<E>(self, v: i64) -> ::core::result::Result<Self::Value, E>
                    where
                        E: ::serde::de::Error,
                    {
                        if let Ok(unsigned) = u32::try_from(v) {
                            return <#name as ::core::convert::TryFrom<u32>>::try_from(unsigned)
                                .map_err(::serde::de::Error::custom)
                        }
                        let v = i32::try_from(v).map_err(::serde::de::Error::custom)?;
                        <#name as ::core::convert::TryFrom<i32>>::try_from(v)
                            .map_err(::serde::de::Error::custom)
                    }
                }

                deserializer.deserialize_any(CodeVisitor)
            }
        }
    };

    TokenStream::from(expanded)
}
