mod access_denied;
mod loading;

pub use access_denied::AccessDenied;
pub use loading::Loading;
