//! Data transfer objects for the Web API.

mod request;
mod response;
mod validation;

pub use request::{LoginRequest, PasswordCheckRequest, RegisterRequest};
pub use response::{
    AnalyzeResponse, ApiResponse, BreachReport, LoginResponse, MeResponse, RegisterResponse,
    UserInfo,
};
pub use validation::ValidatedJson;
