mod derive;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

use crate::derive::expand_bit;

/// Implements `manette_bit_mask::Bitable` for a fieldless enum.
///
/// Variants get consecutive bits in declaration order, starting at bit 0.
#[proc_macro_derive(Bit)]
pub fn derive_bit(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_bit(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
