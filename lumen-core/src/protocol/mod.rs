//! Protocol module for generation and login request/response structures

pub mod types;

pub use types::{
    is_phrases_task, normalize_task, AuthRequest, GenerateResponse, GenerationParams,
    GenerationRequest, LoginResponse, RequestError, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
    MAX_TOKENS_LIMIT, TASK_GENERATE_PHRASES,
};
