//! S3 client generated from `models/s3.json` by the build script

pub mod types {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct ListObjectsInput {
        pub bucket: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub marker: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct ListObjectsOutput {
        #[serde(default)]
        pub keys: Vec<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct DeleteBucketInput {
        pub bucket: String,
    }
}

pub struct S3 {
    service: opgen_runtime::Service,
}

impl S3 {
    pub fn new(service: opgen_runtime::Service) -> Self {
        Self { service }
    }
}

include!(concat!(env!("OUT_DIR"), "/s3.rs"));
