mod model;
mod route;

use proc_macro::TokenStream;

/// Creates a documentation function for the handler, named after it with the suffix `_docs`.
///
/// The first line of the doc comment is used as the operation summary, and the
/// rest as its description. Tags and extra responses are given as arguments:
///
/// ```rust,ignore
/// /// Get trip
/// /// Returns a single trip by its unique id.
/// #[route(tag = tag::TRIP, response(status = 200, shape = "Json<Trip>"))]
/// async fn get_trip() {}
/// ```
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}

/// Creates two request body structs for the model: `CreateX` and `UpdateX`.
///
/// Fields with `#[serde(skip_deserializing)]` or `#[serde(skip)]` are set by the
/// server and left out of both. Every other field is copied with its attributes,
/// and made optional in `UpdateX`.
#[proc_macro_attribute]
pub fn model(_args: TokenStream, input: TokenStream) -> TokenStream {
	model::from_input(input)
}
