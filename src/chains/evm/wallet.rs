use ethers::signers::{ coins_bip39::English, LocalWallet, MnemonicBuilder, Signer };
use ethers::utils::to_checksum;
use sha2::{ Digest, Sha256 };
use uuid::Uuid;

use crate::enums::AddressNamespace;
use crate::error::{ AppError, Result };

const ETH_DERIVATION_ROOT: &str = "m/44'/60'/0'";

/// Deterministic derivation index for an entity uuid: the first 32 bits of
/// SHA-256 over its canonical string form, reduced mod 2^31 to stay below
/// the hardened boundary.
pub fn derivation_index(uuid: &Uuid) -> u32 {
    let digest = Sha256::digest(uuid.to_string().as_bytes());
    let word = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    word % (1 << 31)
}

/// Derive the receiving address for an entity. Same mnemonic, namespace and
/// uuid always yield the same address; the namespace branch keeps the
/// escrow and deposit address spaces apart even for a reused uuid.
///
/// Path: `m/44'/60'/0'/{branch}/{index}` where index = f(uuid).
pub fn derive_address(
    mnemonic: &str,
    namespace: AddressNamespace,
    uuid: &Uuid
) -> Result<String> {
    let index = derivation_index(uuid);
    let derivation_path = format!("{}/{}/{}", ETH_DERIVATION_ROOT, namespace.branch(), index);

    let wallet: LocalWallet = MnemonicBuilder::<English>::default()
        .phrase(mnemonic)
        .derivation_path(&derivation_path)
        .map_err(|e| AppError::Chain(format!("Invalid derivation path: {}", e)))?
        .build()
        .map_err(|_| AppError::InvalidMnemonic)?;

    Ok(to_checksum(&wallet.address(), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str =
        "test test test test test test test test test test test junk";

    #[test]
    fn test_derivation_index_is_stable_and_non_hardened() {
        let uuid = Uuid::parse_str("c9a0c2a3-5f5a-4a74-9e29-2f4f0a9d8b11").unwrap();
        let index = derivation_index(&uuid);
        assert_eq!(index, derivation_index(&uuid));
        assert!(index < (1 << 31));
    }

    #[test]
    fn test_derive_address_is_deterministic() {
        let uuid = Uuid::new_v4();
        let a = derive_address(TEST_MNEMONIC, AddressNamespace::Escrow, &uuid).unwrap();
        let b = derive_address(TEST_MNEMONIC, AddressNamespace::Escrow, &uuid).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_uuids_get_distinct_addresses() {
        let a = derive_address(TEST_MNEMONIC, AddressNamespace::Escrow, &Uuid::new_v4()).unwrap();
        let b = derive_address(TEST_MNEMONIC, AddressNamespace::Escrow, &Uuid::new_v4()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_namespaces_never_collide_for_same_uuid() {
        let uuid = Uuid::new_v4();
        let escrow = derive_address(TEST_MNEMONIC, AddressNamespace::Escrow, &uuid).unwrap();
        let deposit = derive_address(TEST_MNEMONIC, AddressNamespace::Deposit, &uuid).unwrap();
        assert_ne!(escrow, deposit);
    }

    #[test]
    fn test_derive_address_checksum_format() {
        let addr = derive_address(TEST_MNEMONIC, AddressNamespace::Deposit, &Uuid::new_v4())
            .unwrap();
        assert!(addr.starts_with("0x"));
        assert_eq!(addr.len(), 42);
    }

    #[test]
    fn test_malformed_mnemonic_fails() {
        let result = derive_address("not a mnemonic", AddressNamespace::Escrow, &Uuid::new_v4());
        assert!(result.is_err());
    }
}
