//! Plumbing shared by the booking crates: response envelopes and logging setup.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn error_body_omits_nothing() {
        let body = types::ErrorBody::new("Not Found", None);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Not Found");
        assert!(json["message"].is_null());
    }
}
