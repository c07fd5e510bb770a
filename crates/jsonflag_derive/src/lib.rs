//! `#[derive(Reflect)]` for jsonflag records.
//!
//! Generated impls describe the record's fields in declaration order and give
//! index-based access to the exported ones. Field tags are collected from
//! serde attributes (`rename`, `skip`, container `rename_all`), from
//! `#[jsonflag(usage = "...", description = "...", desc = "...")]` and from
//! doc comments.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Lit, LitStr, Meta, Token, Visibility, parse_macro_input, parse_quote};

/// Derive `jsonflag::flag::Reflect` for a struct with named fields.
///
/// The struct must also implement `Default`, `serde::Serialize` and
/// `serde::de::DeserializeOwned`. Private fields and fields marked
/// `#[jsonflag(skip)]` are not visible to discovery.
#[proc_macro_derive(Reflect, attributes(jsonflag))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand(input).unwrap_or_else(|err| err.to_compile_error()).into()
}

struct FieldSpec {
	member: syn::Ident,
	name: String,
	ty: syn::Type,
	exported: bool,
	tags: Vec<(String, String)>,
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
	let ident = &input.ident;
	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new(ident.span(), "Reflect can only be derived for structs with named fields"));
	};
	let Fields::Named(named) = &data.fields else {
		return Err(syn::Error::new(ident.span(), "Reflect can only be derived for structs with named fields"));
	};

	let rename_all = container_rename_all(&input.attrs);
	let specs = named.named.iter().map(|field| field_spec(field, rename_all.as_deref())).collect::<syn::Result<Vec<_>>>()?;

	let descriptors = specs.iter().map(|spec| {
		let name = &spec.name;
		let exported = spec.exported;
		let ty = &spec.ty;
		let tags = spec.tags.iter().map(|(key, value)| quote! { (#key, #value) });
		let shape = if spec.exported {
			quote! { <#ty as ::jsonflag::flag::Reflect>::shape }
		} else {
			quote! { ::jsonflag::rt::unexported_shape }
		};
		quote! {
			::jsonflag::flag::FieldInfo {
				name: #name,
				tags: ::jsonflag::flag::Tags::new(&[#(#tags),*]),
				exported: #exported,
				shape: #shape,
			}
		}
	});

	let exported: Vec<(usize, &syn::Ident)> = specs.iter().enumerate().filter(|(_, spec)| spec.exported).map(|(index, spec)| (index, &spec.member)).collect();
	let field_arms = exported.iter().map(|(index, member)| quote! { #index => ::std::option::Option::Some(&self.#member) });
	let field_mut_arms = exported.iter().map(|(index, member)| quote! { #index => ::std::option::Option::Some(&mut self.#member) });

	let mut generics = input.generics.clone();
	{
		let type_params: Vec<syn::Ident> = generics.type_params().map(|param| param.ident.clone()).collect();
		let where_clause = generics.make_where_clause();
		for param in type_params {
			where_clause.predicates.push(parse_quote! { #param: ::jsonflag::flag::Bindable });
		}
		where_clause.predicates.push(parse_quote! { Self: ::jsonflag::rt::serde::Serialize + ::jsonflag::rt::serde::de::DeserializeOwned + 'static });
	}
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
	let type_name = ident.to_string();

	Ok(quote! {
		impl #impl_generics ::jsonflag::flag::Reflect for #ident #ty_generics #where_clause {
			fn shape() -> ::jsonflag::flag::Shape {
				::jsonflag::flag::Shape::new(#type_name, ::jsonflag::flag::Def::Record(::std::vec![#(#descriptors),*]))
			}

			fn reflect_shape(&self) -> ::jsonflag::flag::Shape {
				<Self as ::jsonflag::flag::Reflect>::shape()
			}

			fn as_any(&self) -> &dyn ::std::any::Any {
				self
			}

			fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
				self
			}

			fn field(&self, index: usize) -> ::std::option::Option<&dyn ::jsonflag::flag::Reflect> {
				match index {
					#(#field_arms,)*
					_ => ::std::option::Option::None,
				}
			}

			fn field_mut(&mut self, index: usize) -> ::std::option::Option<&mut dyn ::jsonflag::flag::Reflect> {
				match index {
					#(#field_mut_arms,)*
					_ => ::std::option::Option::None,
				}
			}

			fn pointee_mut(&mut self) -> &mut dyn ::jsonflag::flag::Reflect {
				self
			}

			fn to_json(&self) -> ::jsonflag::flag::Result<::std::string::String> {
				::jsonflag::rt::to_json(self)
			}

			fn replace_json(&mut self, text: &str) -> ::jsonflag::flag::Result<()> {
				::jsonflag::rt::replace_json(self, text)
			}
		}
	})
}

fn field_spec(field: &syn::Field, rename_all: Option<&str>) -> syn::Result<FieldSpec> {
	let Some(member) = field.ident.clone() else {
		return Err(syn::Error::new_spanned(field, "Reflect requires named fields"));
	};
	let name = member.to_string().trim_start_matches("r#").to_owned();

	let local = jsonflag_attrs(&field.attrs)?;
	let serde = serde_field_attrs(&field.attrs);

	let json = if serde.skip {
		Some("-".to_owned())
	} else if let Some(renamed) = serde.rename {
		Some(renamed)
	} else {
		rename_all.and_then(|rule| apply_rename_rule(rule, &name))
	};

	let mut tags = Vec::new();
	if let Some(json) = json {
		tags.push(("json".to_owned(), json));
	}
	if let Some(usage) = local.usage {
		tags.push(("usage".to_owned(), usage));
	}
	match local.description {
		Some(description) => tags.push(("description".to_owned(), description)),
		None => {
			let doc = doc_text(&field.attrs);
			if !doc.is_empty() {
				tags.push(("description".to_owned(), doc));
			}
		}
	}
	if let Some(desc) = local.desc {
		tags.push(("desc".to_owned(), desc));
	}

	Ok(FieldSpec {
		member,
		name,
		ty: field.ty.clone(),
		exported: !local.skip && !matches!(field.vis, Visibility::Inherited),
		tags,
	})
}

#[derive(Default)]
struct LocalAttrs {
	skip: bool,
	usage: Option<String>,
	description: Option<String>,
	desc: Option<String>,
}

fn jsonflag_attrs(attrs: &[Attribute]) -> syn::Result<LocalAttrs> {
	let mut out = LocalAttrs::default();
	for attr in attrs.iter().filter(|attr| attr.path().is_ident("jsonflag")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("skip") {
				out.skip = true;
				return Ok(());
			}
			let slot = if meta.path.is_ident("usage") {
				&mut out.usage
			} else if meta.path.is_ident("description") {
				&mut out.description
			} else if meta.path.is_ident("desc") {
				&mut out.desc
			} else {
				return Err(meta.error("unknown jsonflag attribute; supported: skip, usage, description, desc"));
			};
			let text: LitStr = meta.value()?.parse()?;
			*slot = Some(text.value());
			Ok(())
		})?;
	}
	Ok(out)
}

#[derive(Default)]
struct SerdeAttrs {
	skip: bool,
	rename: Option<String>,
}

/// Serde attributes are validated by serde itself, so parse errors are ignored here.
fn serde_field_attrs(attrs: &[Attribute]) -> SerdeAttrs {
	let mut out = SerdeAttrs::default();
	for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
		let _ = attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
				out.skip = true;
				return Ok(());
			}
			if meta.path.is_ident("rename") {
				out.rename = rename_value(&meta)?;
				return Ok(());
			}
			ignore_meta(&meta)
		});
	}
	out
}

fn container_rename_all(attrs: &[Attribute]) -> Option<String> {
	let mut rule = None;
	for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
		let _ = attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("rename_all") {
				rule = rename_value(&meta)?;
				return Ok(());
			}
			ignore_meta(&meta)
		});
	}
	rule
}

/// `rename = "x"` or `rename(serialize = "x", ...)`; the serialize name wins.
fn rename_value(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
	if meta.input.peek(Token![=]) {
		let text: LitStr = meta.value()?.parse()?;
		return Ok(Some(text.value()));
	}
	let mut serialize = None;
	meta.parse_nested_meta(|inner| {
		let text: LitStr = inner.value()?.parse()?;
		if inner.path.is_ident("serialize") {
			serialize = Some(text.value());
		}
		Ok(())
	})?;
	Ok(serialize)
}

fn ignore_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
	if meta.input.peek(Token![=]) {
		meta.value()?.parse::<Expr>()?;
	} else if meta.input.peek(syn::token::Paren) {
		meta.parse_nested_meta(|inner| ignore_meta(&inner))?;
	}
	Ok(())
}

fn doc_text(attrs: &[Attribute]) -> String {
	let lines: Vec<String> = attrs
		.iter()
		.filter(|attr| attr.path().is_ident("doc"))
		.filter_map(|attr| match &attr.meta {
			Meta::NameValue(pair) => match &pair.value {
				Expr::Lit(expr) => match &expr.lit {
					Lit::Str(text) => Some(text.value().trim().to_owned()),
					_ => None,
				},
				_ => None,
			},
			_ => None,
		})
		.filter(|line| !line.is_empty())
		.collect();
	lines.join(" ")
}

fn apply_rename_rule(rule: &str, field: &str) -> Option<String> {
	let words = field.split('_').filter(|word| !word.is_empty());
	let renamed = match rule {
		"lowercase" => field.to_lowercase(),
		"UPPERCASE" => field.to_uppercase(),
		"snake_case" => field.to_owned(),
		"SCREAMING_SNAKE_CASE" => field.to_uppercase(),
		"kebab-case" => field.replace('_', "-"),
		"SCREAMING-KEBAB-CASE" => field.to_uppercase().replace('_', "-"),
		"PascalCase" => words.map(capitalize).collect(),
		"camelCase" => {
			let pascal: String = words.map(capitalize).collect();
			let mut chars = pascal.chars();
			match chars.next() {
				Some(first) => first.to_lowercase().chain(chars).collect(),
				None => pascal,
			}
		}
		_ => return None,
	};
	Some(renamed)
}

fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
