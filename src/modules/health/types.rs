pub mod response {
    use serde::Serialize;

    #[derive(Serialize)]
    pub struct Health {
        pub message: &'static str,
        pub environment: &'static str,
    }
}
