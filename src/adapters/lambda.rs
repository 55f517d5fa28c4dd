use crate::domain::model::{ProxyRequest, ProxyResponse};
use lambda_http::{Body, Request, RequestExt, Response};

/// Method and query string of an API Gateway / ALB event. For repeated keys the first value wins.
pub fn proxy_request(event: &Request) -> ProxyRequest {
    let mut request = ProxyRequest::new(event.method().as_str());
    for (name, value) in event.query_string_parameters().iter() {
        request
            .query_params
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }
    request
}

pub fn http_response(response: ProxyResponse) -> Result<Response<Body>, lambda_http::http::Error> {
    let mut builder = Response::builder().status(response.status);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    let body = if response.body.is_empty() {
        Body::Empty
    } else {
        Body::Text(response.body)
    };
    builder.body(body)
}
