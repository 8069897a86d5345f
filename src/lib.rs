//!Cached parsing of query strings and URL encoded form bodies.
//!
//!The parsers take a [`RequestContext`][context], which is the transport's
//!view of one request, and pick out the query string pairs and the form
//!variables. Both are stored in the context together with what they were
//!parsed from, so asking again is cheap and the request body is never read
//!more than once.
//!
//!```
//!extern crate formvars;
//!use formvars::{RequestContext, Body, Method};
//!
//!# fn main() {
//!let mut context = RequestContext {
//!    method: Some(Method::POST),
//!    query_string: Some("id=5".into()),
//!    content_type: Some("application/x-www-form-urlencoded".into()),
//!    content_length: Some("26".into()),
//!    input: Some(Body::from_bytes("name=Alice&tags=a&tags=b+c")),
//!    ..RequestContext::default()
//!};
//!
//!//Only the query string
//!let query = formvars::parse_querystring(&mut context);
//!assert_eq!(query, vec![("id".to_owned(), "5".to_owned())]);
//!
//!//The query string, followed by the body
//!let vars = formvars::parse_formvars(&mut context).unwrap();
//!assert_eq!(vars.get("id"), Some("5"));
//!assert_eq!(vars.get_all("tags"), vec!["a", "b c"]);
//!
//!//The body is gone, but the variables are still there
//!assert!(context.input.as_ref().unwrap().is_consumed());
//!assert_eq!(formvars::parse_formvars(&mut context).unwrap(), vars);
//!# }
//!```
//!
//!The parsing rules can be changed with a [`FormParser`][parser].
//!
//![context]: context/struct.RequestContext.html
//![parser]: form/struct.FormParser.html

#![crate_name = "formvars"]

#![crate_type = "rlib"]

#![cfg_attr(feature = "strict", deny(missing_docs))]
#![cfg_attr(feature = "strict", deny(warnings))]

extern crate url;
extern crate mime;
extern crate http;
#[macro_use]
extern crate log;

pub use http::Method;

pub use self::context::{RequestContext, Body, BodyId, MultiDict, Pairs, Parsed};
pub use self::form::{FormParser, parse_querystring, parse_dict_querystring, parse_formvars};

mod utils;

pub mod context;
pub mod form;
