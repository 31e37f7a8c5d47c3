use crate::{
    request::{GenerationParams, TranslateRequest},
    response::TranslateResponse,
};
use api::endpoints::{http::Method, Endpoint};

pub struct GenerateImage;

impl Endpoint for GenerateImage {
    type Request = GenerationParams;
    /// Raw image bytes
    type Response = Vec<u8>;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "prompt";
}

pub struct TranslateText;

impl Endpoint for TranslateText {
    type Request = TranslateRequest<'static>;
    type Response = TranslateResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "translate";
}
