//!Query string and form variable parsing.
//!
//!The parsers store what they find in the request context, so the query
//!string is only split once and the request body is only read once, no
//!matter how many times the values are asked for.
//!
//!```
//!use formvars::{RequestContext, Body, Method};
//!
//!let mut context = RequestContext {
//!    method: Some(Method::POST),
//!    query_string: Some("a=1&b=2".into()),
//!    content_type: Some("application/x-www-form-urlencoded".into()),
//!    content_length: Some("7".into()),
//!    input: Some(Body::from_bytes("c=3&b=4")),
//!    ..RequestContext::default()
//!};
//!
//!let first = formvars::parse_formvars(&mut context).unwrap();
//!assert_eq!(first.get_all("b"), vec!["2", "4"]);
//!
//!//The body has been read, but the result is still available
//!let second = formvars::parse_formvars(&mut context).unwrap();
//!assert_eq!(first, second);
//!```

use std::io;

use mime::{self, Mime};

use Method;
use context::{RequestContext, MultiDict, Pairs, Parsed};
use utils;

///Parses query strings and form bodies, with a few settings.
///
///The default settings are used by the free functions in this crate.
///Anything else can be set up like this:
///
///```
///use formvars::{FormParser, RequestContext};
///
///let parser = FormParser {
///    body_limit: Some(64 * 1024),
///    ..FormParser::default()
///};
///
///let mut context = RequestContext {
///    query_string: Some("a=1;b=2".into()),
///    ..RequestContext::default()
///};
///
///assert_eq!(parser.parse_dict_querystring(&mut context), [("a", "1"), ("b", "2")]);
///```
///
///The results are cached in the request context, regardless of which parser
///produced them. The first parser to see a context decides what it holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormParser {
    ///Put the query string pairs in front of the form variables. Default is
    ///`true`.
    pub include_query: bool,

    ///Separate pairs with `;` as well as `&`. Default is `true`.
    pub semicolon_separator: bool,

    ///The maximum number of bytes to read from a request body. Longer
    ///bodies are cut off at the limit. Default is `None`, for no limit.
    pub body_limit: Option<u64>,
}

impl FormParser {
    ///Create a parser with the default settings.
    pub fn new() -> FormParser {
        FormParser::default()
    }

    ///Parse the query string into ordered pairs.
    ///
    ///A missing query string is treated as an empty one. The pairs are
    ///stored in the context, together with the query string, and they are
    ///reused for as long as the query string stays the same.
    pub fn parse_querystring(&self, context: &mut RequestContext) -> Pairs {
        if let Some(ref parsed) = context.parsed_querystring {
            if parsed.source == context.query_str() {
                trace!("reusing parsed query string");
                return parsed.value.clone();
            }
        }

        let source = context.query_str().to_owned();
        let pairs = utils::parse_parameters(source.as_bytes(), self.semicolon_separator);
        debug!("parsed {} pairs from the query string", pairs.len());

        context.parsed_querystring = Some(Parsed {
            value: pairs.clone(),
            source: source,
        });

        pairs
    }

    ///Parse the query string into a `MultiDict`.
    pub fn parse_dict_querystring(&self, context: &mut RequestContext) -> MultiDict {
        self.parse_querystring(context).into()
    }

    ///Collect the form variables from the query string and the request body.
    ///
    ///The body is only read if the request is a `POST` with URL encoded
    ///content, and its pairs come after the query string pairs. The result
    ///is stored in the context, together with the identity of the input
    ///stream, and it's reused for as long as the same stream is in place.
    ///The original stream stays in the context after being read.
    ///
    ///Errors from reading the body are passed on as they are.
    pub fn parse_formvars(&self, context: &mut RequestContext) -> io::Result<MultiDict> {
        let source = context.input_id();

        if let Some(ref parsed) = context.parsed_formvars {
            if parsed.source == source {
                trace!("reusing parsed form variables");
                return Ok(parsed.value.clone());
            }
        }

        let mut pairs = if self.include_query {
            self.parse_querystring(context)
        } else {
            Pairs::new()
        };
        pairs.extend(self.read_form_body(context)?);

        let vars = MultiDict::from(pairs);
        context.parsed_formvars = Some(Parsed {
            value: vars.clone(),
            source: source,
        });

        Ok(vars)
    }

    fn read_form_body(&self, context: &mut RequestContext) -> io::Result<Pairs> {
        if context.method != Some(Method::POST) {
            return Ok(Pairs::new());
        }

        if !is_urlencoded(context.content_type.as_ref().map(|s| &**s)) {
            debug!("not reading a body of type {:?}", context.content_type);
            return Ok(Pairs::new());
        }

        let length = content_length(context.content_length.as_ref().map(|s| &**s));
        let limit = match (length, self.body_limit) {
            (Some(length), Some(max)) if length > max => {
                warn!("cutting off a {} byte body at {} bytes", length, max);
                Some(max)
            },
            (Some(length), _) => Some(length),
            (None, max) => max,
        };

        let body = match context.input {
            Some(ref mut input) => input.read_once(limit)?,
            None => {
                debug!("no input stream to read the form body from");
                return Ok(Pairs::new());
            }
        };

        let pairs = utils::parse_parameters(&body, self.semicolon_separator);
        debug!("parsed {} pairs from a {} byte body", pairs.len(), body.len());
        Ok(pairs)
    }
}

impl Default for FormParser {
    fn default() -> FormParser {
        FormParser {
            include_query: true,
            semicolon_separator: true,
            body_limit: None,
        }
    }
}

///Parse the query string of a request into ordered pairs, using the default
///settings.
///
///```
///use formvars::RequestContext;
///
///let mut context = RequestContext {
///    query_string: Some("a=1&b=2&c=3&b=4".into()),
///    ..RequestContext::default()
///};
///
///let pairs = formvars::parse_querystring(&mut context);
///assert_eq!(pairs[1], ("b".to_owned(), "2".to_owned()));
///assert_eq!(pairs[3], ("b".to_owned(), "4".to_owned()));
///```
pub fn parse_querystring(context: &mut RequestContext) -> Pairs {
    FormParser::default().parse_querystring(context)
}

///Parse the query string of a request into a `MultiDict`, using the default
///settings.
pub fn parse_dict_querystring(context: &mut RequestContext) -> MultiDict {
    FormParser::default().parse_dict_querystring(context)
}

///Collect the form variables of a request, using the default settings.
pub fn parse_formvars(context: &mut RequestContext) -> io::Result<MultiDict> {
    FormParser::default().parse_formvars(context)
}

///Check if a content type is `application/x-www-form-urlencoded`, ignoring
///any parameters. A missing or blank content type counts as URL encoded.
fn is_urlencoded(content_type: Option<&str>) -> bool {
    let content_type = match content_type.map(str::trim) {
        None | Some("") => return true,
        Some(content_type) => content_type,
    };

    match content_type.parse::<Mime>() {
        Ok(parsed) => parsed.type_() == mime::APPLICATION && parsed.subtype() == mime::WWW_FORM_URLENCODED,
        Err(_) => false,
    }
}

///Parse a content length. Blank means missing and anything else that isn't
///a number is logged and ignored.
fn content_length(raw: Option<&str>) -> Option<u64> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return None,
        Some(raw) => raw,
    };

    match raw.parse() {
        Ok(length) => Some(length),
        Err(_) => {
            warn!("invalid content length {:?}, reading the whole body", raw);
            None
        }
    }
}
