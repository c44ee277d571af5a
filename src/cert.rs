//! Certificate-keyed access to the dedup store
//!
//! The write path identifies a submission by the SHA-256 of the leaf
//! certificate's DER encoding.

use sha2::{Digest, Sha256};

use crate::error::StorageResult;
use crate::traits::{DedupStorage, LeafDedupInfo, SctDedupInfo};

/// Dedup key of a certificate
pub fn leaf_id_for_cert(cert_der: &[u8]) -> [u8; 32] {
    Sha256::digest(cert_der).into()
}

/// Record the SCT issued for a certificate
pub fn add_cert_dedup_info(
    storage: &dyn DedupStorage,
    cert_der: &[u8],
    info: SctDedupInfo,
) -> StorageResult<()> {
    storage.add(&[LeafDedupInfo {
        leaf_id: leaf_id_for_cert(cert_der).to_vec(),
        info,
    }])
}

/// Look up the SCT previously issued for a certificate
pub fn get_cert_dedup_info(
    storage: &dyn DedupStorage,
    cert_der: &[u8],
) -> StorageResult<Option<SctDedupInfo>> {
    storage.get(&leaf_id_for_cert(cert_der))
}
