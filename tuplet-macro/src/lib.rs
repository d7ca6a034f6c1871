//! Procedural macros used by the [`tuplet`](https://docs.rs/tuplet) crate.
//!
//! There is exactly one macro here, [`impl_tuplets!`], which writes out the whole fixed-arity
//! family so that the library itself does not have to carry sixteen near-identical definitions.

extern crate proc_macro;

use {
    proc_macro::TokenStream,
    proc_macro2::{Literal, Span, TokenStream as TokenStream2},
    quote::{format_ident, quote},
    syn::{parse_macro_input, Ident, Index, LitInt, LitStr},
};

/// Generate `Tuplet1` through `TupletN`, plus the extension shape `Tuplet{N+1}` whose final slot
/// holds another tuplet.
///
/// This must be invoked from inside `tuplet::tuplets`: the generated impls name the traits and the
/// sealing module that live there by their `crate::tuplets` paths.
#[proc_macro]
pub fn impl_tuplets(input: TokenStream) -> TokenStream {
    let max = parse_macro_input!(input as LitInt);
    let max_arity = match max.base10_parse::<usize>() {
        Ok(0) => {
            return syn::Error::new(max.span(), "a tuplet needs at least one slot")
                .to_compile_error()
                .into()
        }
        Ok(n) => n,
        Err(e) => return e.to_compile_error().into(),
    };

    let mut output = TokenStream2::new();
    for arity in 1..=max_arity {
        output.extend(Shape::flat(arity).expand());
    }
    output.extend(Shape::extension(max_arity).expand());
    output.into()
}

/// The layout of one member of the family: some element slots, and possibly an extension slot.
struct Shape {
    name: Ident,
    /// Element type parameters `T1..Tn`.
    items: Vec<Ident>,
    /// Constructor argument names `item1..itemn`, also used as accessor names.
    args: Vec<Ident>,
    /// Field indices `0..n` of the element slots.
    fields: Vec<Index>,
    /// Field index of the extension slot, if this is the extension shape.
    rest: Option<Index>,
}

impl Shape {
    fn flat(arity: usize) -> Self {
        Shape::new(format_ident!("Tuplet{}", arity), arity, false)
    }

    fn extension(max_arity: usize) -> Self {
        Shape::new(format_ident!("Tuplet{}", max_arity + 1), max_arity, true)
    }

    fn new(name: Ident, items: usize, extended: bool) -> Self {
        Shape {
            name,
            items: (1..=items).map(|i| format_ident!("T{}", i)).collect(),
            args: (1..=items).map(|i| format_ident!("item{}", i)).collect(),
            fields: (0..items).map(Index::from).collect(),
            rest: if extended {
                Some(Index::from(items))
            } else {
                None
            },
        }
    }

    fn len(&self) -> Literal {
        Literal::usize_unsuffixed(self.items.len())
    }

    /// The generic parameter list, with `item` bounding every element parameter and `rest`
    /// (together with `Tuplet`) bounding the extension parameter.
    fn generics(
        &self,
        lifetime: Option<TokenStream2>,
        item: Option<TokenStream2>,
        rest: Option<TokenStream2>,
    ) -> TokenStream2 {
        let lifetime = lifetime.into_iter();
        let items = self.items.iter().map(|t| match &item {
            Some(bound) => quote!(#t: #bound),
            None => quote!(#t),
        });
        let rest = self.rest.as_ref().map(|_| match rest {
            Some(bound) => quote!(Rest: crate::tuplets::Tuplet + #bound),
            None => quote!(Rest: crate::tuplets::Tuplet),
        });
        quote!(<#(#lifetime,)* #(#items,)* #rest>)
    }

    fn ty(&self) -> TokenStream2 {
        let name = &self.name;
        let items = &self.items;
        let rest = self.rest.as_ref().map(|_| quote!(Rest));
        quote!(#name<#(#items,)* #rest>)
    }

    fn expand(&self) -> TokenStream2 {
        let definition = self.definition();
        let inherent = self.inherent();
        let conversions = self.conversions();
        let family = self.family();
        let formatting = self.formatting();
        let serde = self.serde();
        quote! {
            #definition
            #inherent
            #conversions
            #family
            #formatting
            #serde
        }
    }

    fn definition(&self) -> TokenStream2 {
        let name = &self.name;
        let items = &self.items;
        let n = self.items.len();
        let (doc, rest_param, rest_field) = match self.rest {
            None => (
                format!("An immutable tuplet of {} element{}.", n, if n == 1 { "" } else { "s" }),
                None,
                None,
            ),
            Some(_) => (
                format!(
                    "A tuplet of {} elements followed by an extension slot holding a further \
                     tuplet, used for arities beyond {}.\n\nThe extension slot is transparent: \
                     formatting, hashing and serialization treat its elements as if they were \
                     direct members of this tuplet.",
                    n, n
                ),
                Some(quote!(Rest: crate::tuplets::Tuplet)),
                Some(quote!(Rest)),
            ),
        };
        quote! {
            #[doc = #doc]
            #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
            pub struct #name<#(#items,)* #rest_param>(#(#items,)* #rest_field);
        }
    }

    fn inherent(&self) -> TokenStream2 {
        let generics = self.generics(None, None, None);
        let ty = self.ty();
        let items = &self.items;
        let args = &self.args;
        let fields = &self.fields;
        let getter_docs = (1..=self.items.len()).map(|i| format!("The element in slot {}.", i));

        let extra = match &self.rest {
            None => quote! {
                /// Create a tuplet from its elements, in slot order.
                pub const fn new(#(#args: #items),*) -> Self {
                    Self(#(#args),*)
                }

                /// Convert into the equivalent standard tuple.
                pub fn into_tuple(self) -> (#(#items,)*) {
                    (#(self.#fields,)*)
                }
            },
            Some(rest) => quote! {
                /// Create a tuplet from its elements, in slot order, followed by the tuplet
                /// holding every element after them.
                pub const fn new(#(#args: #items,)* rest: Rest) -> Self {
                    Self(#(#args,)* rest)
                }

                /// The tuplet in the extension slot.
                pub fn rest(&self) -> &Rest {
                    &self.#rest
                }

                /// Split into the direct elements and the tuplet in the extension slot.
                pub fn into_parts(self) -> (#(#items,)* Rest) {
                    (#(self.#fields,)* self.#rest)
                }
            },
        };

        quote! {
            impl #generics #ty {
                #extra

                #(
                    #[doc = #getter_docs]
                    pub fn #args(&self) -> &#items {
                        &self.#fields
                    }
                )*
            }
        }
    }

    fn conversions(&self) -> TokenStream2 {
        let name = &self.name;
        let items = &self.items;
        let args = &self.args;
        let len = self.len();
        let same = vec![format_ident!("T"); self.items.len()];

        match &self.rest {
            None => {
                let generics = self.generics(None, None, None);
                let ty = self.ty();
                quote! {
                    impl #generics From<(#(#items,)*)> for #ty {
                        fn from((#(#args,)*): (#(#items,)*)) -> Self {
                            Self(#(#args),*)
                        }
                    }

                    impl<T> ::core::convert::TryFrom<Vec<T>> for #name<#(#same),*> {
                        type Error = crate::Error;

                        fn try_from(
                            items: Vec<T>,
                        ) -> Result<Self, Self::Error> {
                            let found = items.len();
                            match <[T; #len] as ::core::convert::TryFrom<Vec<T>>>::try_from(items) {
                                Ok([#(#args),*]) => Ok(Self(#(#args),*)),
                                Err(_) => Err(crate::Error::Arity { expected: #len, found }),
                            }
                        }
                    }
                }
            }
            Some(_) => quote! {
                impl<T, Rest> ::core::convert::TryFrom<Vec<T>> for #name<#(#same,)* Rest>
                where
                    Rest: crate::tuplets::Tuplet
                        + ::core::convert::TryFrom<Vec<T>, Error = crate::Error>,
                {
                    type Error = crate::Error;

                    fn try_from(
                        mut items: Vec<T>,
                    ) -> Result<Self, Self::Error> {
                        let expected = <Self as crate::tuplets::Tuplet>::ARITY;
                        let found = items.len();
                        if found != expected {
                            return Err(crate::Error::Arity { expected, found });
                        }
                        let rest = <Rest as ::core::convert::TryFrom<Vec<T>>>::try_from(
                            items.split_off(#len),
                        )?;
                        match <[T; #len] as ::core::convert::TryFrom<Vec<T>>>::try_from(items) {
                            Ok([#(#args),*]) => Ok(Self(#(#args,)* rest)),
                            Err(_) => Err(crate::Error::Arity { expected, found }),
                        }
                    }
                }
            },
        }
    }

    fn family(&self) -> TokenStream2 {
        let generics = self.generics(None, None, None);
        let ty = self.ty();
        let fields = &self.fields;
        let len = self.len();

        let (arity, flat_arity, rest_elements) = match &self.rest {
            None => (quote!(#len), quote!(#len), None),
            Some(rest) => (
                quote!(#len + <Rest as crate::tuplets::Tuplet>::ARITY),
                quote!(#len + 1),
                Some(quote! {
                    crate::tuplets::flatten::Elements::push_elements(&self.#rest, out);
                }),
            ),
        };
        let any_generics = self.generics(
            None,
            Some(quote!(::core::any::Any)),
            Some(quote!(crate::tuplets::flatten::Elements)),
        );

        quote! {
            impl #generics crate::tuplets::sealed::Sealed for #ty {}

            impl #generics crate::tuplets::Tuplet for #ty {
                const ARITY: usize = #arity;
                const FLAT_ARITY: usize = #flat_arity;
            }

            impl #any_generics crate::tuplets::flatten::Elements for #ty {
                fn push_elements<'a>(&'a self, out: &mut Vec<&'a dyn ::core::any::Any>) {
                    #(out.push(&self.#fields);)*
                    #rest_elements
                }
            }
        }
    }

    fn formatting(&self) -> TokenStream2 {
        let ty = self.ty();
        let fields = &self.fields;
        let first = &self.fields[0];
        let tail = &self.fields[1..];
        let debug_name = LitStr::new(&self.name.to_string(), Span::call_site());

        let display_generics = self.generics(
            None,
            Some(quote!(::core::fmt::Display)),
            Some(quote!(crate::tuplets::flatten::DisplayElements)),
        );
        let debug_generics = self.generics(
            None,
            Some(quote!(::core::fmt::Debug)),
            Some(quote!(crate::tuplets::flatten::DebugElements)),
        );

        let rest_display = self.rest.as_ref().map(|rest| {
            quote! {
                f.write_str(", ")?;
                crate::tuplets::flatten::DisplayElements::fmt_elements(&self.#rest, f)?;
            }
        });
        let debug_body = match &self.rest {
            None => quote! {
                let _ = tuple #(.field(&self.#fields))*;
            },
            Some(rest) => quote! {
                crate::tuplets::flatten::DebugElements::debug_elements(
                    &self.#rest,
                    tuple #(.field(&self.#fields))*,
                );
            },
        };

        quote! {
            impl #display_generics ::core::fmt::Display for #ty {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    f.write_str("(")?;
                    crate::tuplets::flatten::DisplayElements::fmt_elements(self, f)?;
                    f.write_str(")")
                }
            }

            impl #display_generics crate::tuplets::flatten::DisplayElements for #ty {
                fn fmt_elements(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    ::core::fmt::Display::fmt(&self.#first, f)?;
                    #(
                        f.write_str(", ")?;
                        ::core::fmt::Display::fmt(&self.#tail, f)?;
                    )*
                    #rest_display
                    Ok(())
                }
            }

            impl #debug_generics ::core::fmt::Debug for #ty {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    let mut tuple = f.debug_tuple(#debug_name);
                    crate::tuplets::flatten::DebugElements::debug_elements(self, &mut tuple);
                    tuple.finish()
                }
            }

            impl #debug_generics crate::tuplets::flatten::DebugElements for #ty {
                fn debug_elements(&self, tuple: &mut ::core::fmt::DebugTuple<'_, '_>) {
                    #debug_body
                }
            }
        }
    }

    fn serde(&self) -> TokenStream2 {
        let ty = self.ty();
        let fields = &self.fields;
        let offsets = (0..self.items.len()).map(Literal::usize_unsuffixed);
        let len = self.len();

        let ser_generics = self.generics(
            None,
            Some(quote!(serde_crate::Serialize)),
            Some(quote!(crate::tuplets::flatten::SerializeElements)),
        );
        let de_generics = self.generics(
            Some(quote!('de)),
            Some(quote!(serde_crate::Deserialize<'de>)),
            Some(quote!(crate::tuplets::flatten::DeserializeElements<'de>)),
        );

        let (rest_ser, rest_de) = match &self.rest {
            None => (None, None),
            Some(rest) => (
                Some(quote! {
                    crate::tuplets::flatten::SerializeElements::serialize_elements(&self.#rest, seq)?;
                }),
                Some(quote! {
                    <Rest as crate::tuplets::flatten::DeserializeElements<'de>>::deserialize_elements(
                        seq,
                        offset + #len,
                        arity,
                    )?,
                }),
            ),
        };

        quote! {
            #[cfg(feature = "serde")]
            impl #ser_generics serde_crate::Serialize for #ty {
                fn serialize<S: serde_crate::Serializer>(
                    &self,
                    serializer: S,
                ) -> Result<S::Ok, S::Error> {
                    use serde_crate::ser::SerializeTuple as _;
                    let mut seq =
                        serializer.serialize_tuple(<Self as crate::tuplets::Tuplet>::ARITY)?;
                    crate::tuplets::flatten::SerializeElements::serialize_elements(self, &mut seq)?;
                    seq.end()
                }
            }

            #[cfg(feature = "serde")]
            impl #ser_generics crate::tuplets::flatten::SerializeElements for #ty {
                fn serialize_elements<S: serde_crate::ser::SerializeTuple>(
                    &self,
                    seq: &mut S,
                ) -> Result<(), S::Error> {
                    #(seq.serialize_element(&self.#fields)?;)*
                    #rest_ser
                    Ok(())
                }
            }

            #[cfg(feature = "serde")]
            impl #de_generics serde_crate::Deserialize<'de> for #ty {
                fn deserialize<D: serde_crate::Deserializer<'de>>(
                    deserializer: D,
                ) -> Result<Self, D::Error> {
                    deserializer.deserialize_tuple(
                        <Self as crate::tuplets::Tuplet>::ARITY,
                        crate::tuplets::flatten::TupletVisitor::<Self>::new(),
                    )
                }
            }

            #[cfg(feature = "serde")]
            impl #de_generics crate::tuplets::flatten::DeserializeElements<'de> for #ty {
                fn deserialize_elements<A: serde_crate::de::SeqAccess<'de>>(
                    seq: &mut A,
                    offset: usize,
                    arity: usize,
                ) -> Result<Self, A::Error> {
                    Ok(Self(
                        #(crate::tuplets::flatten::next_element(seq, offset + #offsets, arity)?,)*
                        #rest_de
                    ))
                }
            }
        }
    }
}
