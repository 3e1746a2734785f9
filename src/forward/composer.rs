//! Response composition: downstream response → [`ForwardResult`].
//!
//! Status and body are surfaced for every status code. Headers are merged
//! general-first, then content headers, so a content header overwrites a
//! general header of the same name.

use crate::forward::headers::{FlatHeaders, HeaderBag, RESPONSE_SKIP};
use crate::forward::model::{ForwardResult, OutboundResponse};

pub fn compose(response: OutboundResponse) -> ForwardResult {
    let mut headers = FlatHeaders::new();
    merge(&mut headers, &response.headers);
    merge(&mut headers, &response.content_headers);

    let body = String::from_utf8_lossy(&response.body).into_owned();

    ForwardResult::new(response.status, body, headers)
}

fn merge(target: &mut FlatHeaders, source: &HeaderBag) {
    for (name, values) in source.iter() {
        if RESPONSE_SKIP.contains(name) {
            continue;
        }
        target.insert(name, values.join(", "));
    }
}
