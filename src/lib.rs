//! Procedural macros for desk-nexus applications.
//!
//! `#[view]` turns a plain struct into a routable page with a placeholder
//! body, for pages whose real content lives elsewhere.

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemStruct, LitStr};

/// Attribute macro implementing `desk_nexus::Component` for a page.
///
/// # Usage
///
/// ```ignore
/// #[view(title = "Calendar", summary = "Posts queued for publishing")]
/// #[derive(Default)]
/// pub struct ScheduledPosts;
/// ```
///
/// The macro generates:
/// - `impl Component for ScheduledPosts` rendering a bordered block titled
///   `title` with `summary` centered inside it.
/// - `ScheduledPosts::TITLE`, for navigation labels.
///
/// Both arguments are optional; the title defaults to the struct name.
/// Generic structs are rejected.
#[proc_macro_attribute]
pub fn view(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(&input.generics, "#[view] does not support generic pages")
            .to_compile_error()
            .into();
    }

    let mut title: Option<LitStr> = None;
    let mut summary: Option<LitStr> = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("title") {
            title = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("summary") {
            summary = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `title` or `summary`"))
        }
    });
    parse_macro_input!(attr with parser);

    let title = title.unwrap_or_else(|| LitStr::new(&struct_name.to_string(), struct_name.span()));
    let summary = summary.unwrap_or_else(|| LitStr::new("", struct_name.span()));

    let expanded = quote! {
        #input

        impl #struct_name {
            /// Label shown for this page in navigation.
            pub const TITLE: &'static str = #title;
        }

        impl ::desk_nexus::Component for #struct_name {
            fn render(&mut self, frame: &mut ::ratatui::Frame, cx: &mut ::desk_nexus::Context<Self>) {
                let block = ::ratatui::widgets::Block::default()
                    .title(format!(" {} ", Self::TITLE))
                    .borders(::ratatui::widgets::Borders::ALL);
                let paragraph = ::ratatui::widgets::Paragraph::new(#summary)
                    .block(block)
                    .alignment(::ratatui::layout::Alignment::Center);
                frame.render_widget(paragraph, cx.area);
            }
        }
    };

    TokenStream::from(expanded)
}
