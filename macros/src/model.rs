use darling::{ast, FromDeriveInput, FromField};
use proc_macro2::TokenTree;
use quote::{format_ident, quote, ToTokens};
use syn::{GenericArgument, Meta, PathArguments, Type};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named), forward_attrs)]
struct ModelInputReceiver {
	ident: syn::Ident,
	generics: syn::Generics,
	data: ast::Data<(), ModelFieldReceiver>,
	attrs: Vec<syn::Attribute>,
}

#[derive(Debug, FromField)]
#[darling(forward_attrs)]
struct ModelFieldReceiver {
	ident: Option<syn::Ident>,
	ty: syn::Type,
	vis: syn::Visibility,
	attrs: Vec<syn::Attribute>,
}

/// Whether the field is never read from a request body, i.e. it has
/// `#[serde(skip_deserializing)]` or `#[serde(skip)]`.
fn is_server_side(attrs: &[syn::Attribute]) -> bool {
	attrs.iter().any(|attr| {
		let Meta::List(ref list) = attr.meta else {
			return false;
		};

		list.path.is_ident("serde")
			&& list.tokens.to_token_stream().into_iter().any(|token| {
				matches!(token, TokenTree::Ident(ref ident) if ident == "skip_deserializing" || ident == "skip")
			})
	})
}

/// Returns `T` if `ty` is `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
	let Type::Path(path) = ty else {
		return None;
	};

	let segment = path.path.segments.last()?;

	if segment.ident != "Option" {
		return None;
	}

	let PathArguments::AngleBracketed(ref args) = segment.arguments else {
		return None;
	};

	match args.args.first()? {
		GenericArgument::Type(inner) => Some(inner),
		_ => None,
	}
}

pub fn from_input(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = syn::parse_macro_input!(input as syn::DeriveInput);
	let receiver = match ModelInputReceiver::from_derive_input(&input) {
		Ok(x) => x,
		Err(e) => return e.write_errors().into(),
	};

	let ident = &receiver.ident;
	let vis = &input.vis;
	let generics = &receiver.generics;
	let create_ident = format_ident!("Create{}", ident);
	let update_ident = format_ident!("Update{}", ident);

	// the model's own docs describe the stored document, not the inputs
	let attrs = receiver
		.attrs
		.iter()
		.filter(|attr| !attr.path().is_ident("doc"))
		.collect::<Vec<_>>();

	let create_doc = format!("The request body used to create a [`{ident}`].");
	let update_doc = format!(
		"The request body used to update a [`{ident}`]. Missing fields are left unchanged."
	);

	let Some(fields) = receiver.data.take_struct() else {
		return syn::Error::new_spanned(ident, "#[model] only supports structs")
			.into_compile_error()
			.into();
	};

	let fields = fields
		.iter()
		.filter(|field| !is_server_side(&field.attrs))
		.filter_map(|field| Some((&field.attrs, field.ident.as_ref()?, &field.ty, &field.vis)))
		.collect::<Vec<_>>();

	let create_fields = fields.iter().map(|(attrs, ident, ty, vis)| {
		quote! {
			#(#attrs)*
			#vis #ident: #ty,
		}
	});

	// optional fields are not wrapped twice, so `null` and a missing field both mean "unchanged"
	let update_fields = fields.iter().map(|(attrs, ident, ty, vis)| {
		let ty = option_inner(ty).unwrap_or(*ty);

		quote! {
			#(#attrs)*
			#vis #ident: Option<#ty>,
		}
	});

	quote! {
		#input

		#[doc = #create_doc]
		#(#attrs)*
		#vis struct #create_ident #generics {
			#(
				#create_fields
			)*
		}

		#[doc = #update_doc]
		#(#attrs)*
		#vis struct #update_ident #generics {
			#(
				#update_fields
			)*
		}
	}
	.into()
}
