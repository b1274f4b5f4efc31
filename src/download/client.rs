// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::Result;
use attohttpc::Response;
use std::io::{self, Read};
use std::time::Duration;

pub trait HttpClient {
    fn get(&self, url: &str) -> Result<Box<dyn HttpResponse>>;
}

pub trait HttpResponse: Read {
    fn is_success(&self) -> bool;

    /// Status line text, e.g. "404 Not Found".
    fn status_text(&self) -> String;

    fn content_length(&self) -> Option<u64>;
}

pub struct AttohttpcClient {
    timeout: Duration,
    user_agent: String,
}

impl AttohttpcClient {
    /// `timeout` is the single configured duration; connection
    /// establishment gets a third of it, the overall request two thirds.
    pub fn new(timeout: Duration, user_agent: String) -> Self {
        Self {
            timeout,
            user_agent,
        }
    }
}

impl HttpClient for AttohttpcClient {
    fn get(&self, url: &str) -> Result<Box<dyn HttpResponse>> {
        let response = attohttpc::get(url)
            .connect_timeout(self.timeout / 3)
            .timeout(self.timeout * 2 / 3)
            .header("User-Agent", &self.user_agent)
            .follow_redirects(true)
            .send()?;

        Ok(Box::new(AttohttpcResponse { response }))
    }
}

struct AttohttpcResponse {
    response: Response,
}

impl Read for AttohttpcResponse {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.response.read(buf)
    }
}

impl HttpResponse for AttohttpcResponse {
    fn is_success(&self) -> bool {
        self.response.is_success()
    }

    fn status_text(&self) -> String {
        let status = self.response.status();
        match status.canonical_reason() {
            Some(reason) => format!("{} {reason}", status.as_u16()),
            None => status.as_u16().to_string(),
        }
    }

    fn content_length(&self) -> Option<u64> {
        self.response
            .headers()
            .get("Content-Length")?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }
}
