use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Fields, Variant, parse_macro_input};

/// 提取文档注释，去掉`///`后紧跟的一个空格，保留其余缩进。
fn extract_doc(attrs: &[syn::Attribute]) -> String {
    let mut lines = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let syn::Meta::NameValue(nv) = &attr.meta {
            if let syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(s), .. }) = &nv.value {
                let line = s.value();
                lines.push(line.strip_prefix(' ').map(str::to_owned).unwrap_or(line));
            }
        }
    }
    lines.join("\n")
}

/// 变体名转为小写蛇形，例如`FlatMap`转为`flat_map`。
fn snake_name(variant: &Variant) -> String {
    let mut name = String::new();
    for (i, c) in variant.ident.to_string().chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                name.push('_');
            }
            name.extend(c.to_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

fn pattern(variant: &Variant) -> proc_macro2::TokenStream {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Unit => quote! { #ident },
        Fields::Unnamed(_) => quote! { #ident(..) },
        Fields::Named(_) => quote! { #ident { .. } },
    }
}

#[proc_macro_derive(OpDoc)]
pub fn op_doc_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_name = &input.ident;

    let Data::Enum(DataEnum { variants, .. }) = &input.data else {
        return syn::Error::new_spanned(enum_name, "OpDoc can only be derived on enums").to_compile_error().into();
    };

    // ==============================
    // 1. name(&self)：变体的小写蛇形名
    // ==============================
    let name_entries = variants.iter().map(|v| {
        let pattern = pattern(v);
        let name = snake_name(v);
        quote! { Self::#pattern => #name, }
    });

    // ==============================
    // 2. doc(&self)：变体的文档注释
    // ==============================
    let doc_entries = variants.iter().map(|v| {
        let pattern = pattern(v);
        let doc = extract_doc(&v.attrs);
        quote! { Self::#pattern => #doc, }
    });

    // ===========================================
    // 3. all_docs()：按声明顺序返回所有 (name, doc) 对
    // ===========================================
    let all_doc_entries = variants.iter().map(|v| {
        let name = snake_name(v);
        let doc = extract_doc(&v.attrs);
        quote! { (#name, #doc) }
    });

    let expanded = quote! {
        impl #enum_name {
            /// 操作名。
            pub fn name(&self) -> &'static str {
                match self {
                    #(#name_entries)*
                }
            }

            /// 操作说明。
            pub fn doc(&self) -> &'static str {
                match self {
                    #(#doc_entries)*
                }
            }

            /// 全部操作说明：[(name, doc), ...]
            pub fn all_docs() -> &'static [(&'static str, &'static str)] {
                &[
                    #(#all_doc_entries),*
                ]
            }
        }
    };

    TokenStream::from(expanded)
}
