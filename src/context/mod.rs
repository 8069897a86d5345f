//!The request context and the data parsed from it.
//!
//!#Context
//!
//!A [`RequestContext`][context] holds the parts of one request that the
//!parsers care about, like the method, the raw query string and the input
//!stream. It's created by the transport for each request and lives as long
//!as the request. The parsers only read it and annotate it with their
//!results, so asking for the same data twice doesn't mean parsing it twice.
//!
//!```
//!use formvars::{RequestContext, Body, Method};
//!
//!let mut context = RequestContext {
//!    method: Some(Method::POST),
//!    query_string: Some("page=2".into()),
//!    content_type: Some("application/x-www-form-urlencoded".into()),
//!    input: Some(Body::from_bytes("name=Alice")),
//!    ..RequestContext::default()
//!};
//!
//!let vars = formvars::parse_formvars(&mut context).unwrap();
//!assert_eq!(vars, [("page", "2"), ("name", "Alice")]);
//!```
//!
//!#Environment Variables
//!
//!A context can also be built from plain CGI style variables, where the
//!well known names are picked out and the rest are kept in `vars`:
//!
//!```
//!use formvars::RequestContext;
//!
//!let context = RequestContext::from_vars(vec![
//!    ("REQUEST_METHOD", "GET"),
//!    ("QUERY_STRING", "a=1"),
//!    ("HTTP_HOST", "example.com"),
//!]);
//!
//!assert_eq!(context.var("QUERY_STRING"), Some("a=1"));
//!assert_eq!(context.var("HTTP_HOST"), Some("example.com"));
//!```
//!
//!#Cached Results
//!
//!The parsed query string and form variables are stored in the
//!`parsed_querystring` and `parsed_formvars` slots, together with the source
//!they were parsed from. A slot is only used as long as its source is still
//!the one in the context, so replacing the query string or the input stream
//!makes the parsers start over.
//!
//![context]: struct.RequestContext.html

use std::collections::HashMap;

use Method;

pub use self::body::{Body, BodyId};
pub use self::multi_dict::MultiDict;

pub mod body;
pub mod multi_dict;

///Ordered name-value pairs, with duplicates kept in place.
pub type Pairs = Vec<(String, String)>;

///The name of the request method variable.
pub const REQUEST_METHOD: &'static str = "REQUEST_METHOD";
///The name of the query string variable.
pub const QUERY_STRING: &'static str = "QUERY_STRING";
///The name of the content type variable.
pub const CONTENT_TYPE: &'static str = "CONTENT_TYPE";
///The name of the content length variable.
pub const CONTENT_LENGTH: &'static str = "CONTENT_LENGTH";

///A parsed value and the source it was parsed from.
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed<T, S> {
    ///The parsed value.
    pub value: T,

    ///What `value` was parsed from. The value is only valid as long as this
    ///matches the current source.
    pub source: S,
}

///A container for the input data of one request.
#[derive(Debug, Default)]
pub struct RequestContext {
    ///The HTTP method.
    pub method: Option<Method>,

    ///The raw query string, without the leading `?`.
    pub query_string: Option<String>,

    ///The raw `Content-Type` of the request body.
    pub content_type: Option<String>,

    ///The raw `Content-Length` of the request body.
    pub content_length: Option<String>,

    ///The request body.
    pub input: Option<Body>,

    ///Other request variables.
    pub vars: HashMap<String, String>,

    ///The query string pairs, and the query string they were parsed from.
    pub parsed_querystring: Option<Parsed<Pairs, String>>,

    ///The form variables, and the identity of the body they were read from.
    pub parsed_formvars: Option<Parsed<MultiDict, Option<BodyId>>>,
}

impl RequestContext {
    ///Create an empty context.
    pub fn new() -> RequestContext {
        RequestContext::default()
    }

    ///Build a context from CGI style variables.
    ///
    ///`REQUEST_METHOD`, `QUERY_STRING`, `CONTENT_TYPE` and `CONTENT_LENGTH`
    ///are moved into their fields and everything else ends up in `vars`. The
    ///input stream has to be added separately.
    pub fn from_vars<I, K, V>(vars: I) -> RequestContext where
        I: IntoIterator<Item=(K, V)>,
        K: Into<String>,
        V: Into<String>
    {
        let mut context = RequestContext::new();
        for (name, value) in vars {
            context.set_var(name, value);
        }
        context
    }

    ///Get a request variable by its CGI name.
    pub fn var(&self, name: &str) -> Option<&str> {
        match name {
            REQUEST_METHOD => self.method.as_ref().map(Method::as_str),
            QUERY_STRING => self.query_string.as_ref().map(|s| &**s),
            CONTENT_TYPE => self.content_type.as_ref().map(|s| &**s),
            CONTENT_LENGTH => self.content_length.as_ref().map(|s| &**s),
            _ => self.vars.get(name).map(|s| &**s),
        }
    }

    ///Set a request variable by its CGI name.
    ///
    ///A `REQUEST_METHOD` that isn't a valid method is logged and leaves the
    ///method unset.
    pub fn set_var<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) {
        let name = name.into();
        let value = value.into();

        match &*name {
            REQUEST_METHOD => {
                self.method = match Method::from_bytes(value.as_bytes()) {
                    Ok(method) => Some(method),
                    Err(_) => {
                        warn!("ignoring invalid {}: {:?}", REQUEST_METHOD, value);
                        None
                    }
                };
            },
            QUERY_STRING => self.query_string = Some(value),
            CONTENT_TYPE => self.content_type = Some(value),
            CONTENT_LENGTH => self.content_length = Some(value),
            _ => { self.vars.insert(name, value); },
        }
    }

    ///The query string, or an empty string if there is none.
    pub fn query_str(&self) -> &str {
        self.query_string.as_ref().map(|s| &**s).unwrap_or("")
    }

    ///The identity of the current input stream, if any.
    pub fn input_id(&self) -> Option<BodyId> {
        self.input.as_ref().map(Body::id)
    }
}
