//! Bucket policy documents
//!
//! Only one policy is ever attached by this tool: the public-read policy
//! granting `s3:GetObject` on every object in a bucket.

/// Render the public-read policy document for a bucket
///
/// Uses `2012-10-17` policy-language semantics with principal `*` and the
/// ARN-style resource path `arn:aws:s3:::{bucket}/*`.
pub fn public_read_policy(bucket: &str) -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Sid": "PublicReadGetObject",
                "Effect": "Allow",
                "Principal": "*",
                "Action": "s3:GetObject",
                "Resource": format!("arn:aws:s3:::{bucket}/*"),
            }
        ]
    })
    .to_string()
}
