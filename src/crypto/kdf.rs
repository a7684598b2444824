use argon2::{Algorithm, Argon2, Version};
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use serde::{Serialize, Serializer};
use zeroize::Zeroizing;

use super::{KEY_LEN, MEM_COST_KIB, MIN_KEY_LEN, MIN_SALT_LEN, SALT_LEN, TIME_COST};
use crate::error::{Error, Result};

/// Inputs to one Argon2id derivation, as carried in an encoded hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Params {
    #[serde(serialize_with = "as_base64")]
    pub salt: Vec<u8>,
    pub time_cost: u32,
    pub mem_cost_kib: u32,
    pub parallelism: u32,
    pub key_len: u32,
}

fn as_base64<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD_NO_PAD.encode(bytes))
}

/// Cost settings used when producing a new hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashConfig {
    time_cost: u32,
    mem_cost_kib: u32,
    parallelism: u32,
    key_len: u32,
    salt_len: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            time_cost: TIME_COST,
            mem_cost_kib: MEM_COST_KIB, // 64 MiB
            parallelism: available_parallelism(),
            key_len: KEY_LEN as u32,
            salt_len: SALT_LEN,
        }
    }
}

impl HashConfig {
    pub fn new(
        time_cost: u32,
        mem_cost_kib: u32,
        parallelism: u32,
        key_len: u32,
        salt_len: usize,
    ) -> Result<Self> {
        let config = Self {
            time_cost,
            mem_cost_kib,
            parallelism,
            key_len,
            salt_len,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn mem_cost_kib(&self) -> u32 {
        self.mem_cost_kib
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn key_len(&self) -> u32 {
        self.key_len
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> { Err(Error::KeyDerivation(msg.to_string())) };

        if self.time_cost < 1 {
            return invalid("time cost must be >= 1");
        }
        if self.parallelism < 1 {
            return invalid("parallelism must be >= 1");
        }
        if self.parallelism > argon2::Params::MAX_P_COST {
            return invalid("parallelism too large");
        }
        if u64::from(self.mem_cost_kib) < 8 * u64::from(self.parallelism) {
            return invalid("memory cost must be at least 8 * parallelism");
        }
        if (self.key_len as usize) < MIN_KEY_LEN {
            return invalid("key length too short");
        }
        if self.salt_len < MIN_SALT_LEN {
            return invalid("salt length too short");
        }
        Ok(())
    }

    /// Builds the derivation parameters for a freshly generated salt.
    pub fn params(&self, salt: Vec<u8>) -> Params {
        Params {
            salt,
            time_cost: self.time_cost,
            mem_cost_kib: self.mem_cost_kib,
            parallelism: self.parallelism,
            key_len: self.key_len,
        }
    }
}

/// Number of processing units on the host, read once per call.
fn available_parallelism() -> u32 {
    std::thread::available_parallelism()
        .map(|n| u32::try_from(n.get()).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

/// Derive a key of `params.key_len` bytes from `password` with Argon2id.
pub fn derive_key(password: &str, params: &Params) -> Result<Zeroizing<Vec<u8>>> {
    // argon2 multiplies p by 8 in u32 before its own range check
    if params.parallelism > argon2::Params::MAX_P_COST {
        return Err(Error::KeyDerivation("parallelism too large".to_string()));
    }

    let argon_params = argon2::Params::new(
        params.mem_cost_kib,
        params.time_cost,
        params.parallelism,
        Some(params.key_len as usize),
    )
    .map_err(|e| Error::KeyDerivation(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut key = Zeroizing::new(vec![0u8; params.key_len as usize]);
    argon2
        .hash_password_into(password.as_bytes(), &params.salt, &mut key)
        .map_err(|e| Error::KeyDerivation(e.to_string()))?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap(salt: &[u8]) -> Params {
        Params {
            salt: salt.to_vec(),
            time_cost: 1,
            mem_cost_kib: 64,
            parallelism: 1,
            key_len: 32,
        }
    }

    #[test]
    fn kdf_is_deterministic() {
        let params = cheap(&[42u8; 16]);

        let k1 = derive_key("password", &params).unwrap();
        let k2 = derive_key("password", &params).unwrap();

        assert_eq!(*k1, *k2);
        assert_eq!(k1.len(), 32);
    }

    #[test]
    fn kdf_params_affect_output() {
        let p1 = cheap(&[7u8; 16]);
        let p2 = Params {
            mem_cost_kib: 128,
            ..p1.clone()
        };
        let p3 = Params {
            salt: vec![8u8; 16],
            ..p1.clone()
        };

        let k1 = derive_key("pw", &p1).unwrap();
        assert_ne!(*k1, *derive_key("pw", &p2).unwrap());
        assert_ne!(*k1, *derive_key("pw", &p3).unwrap());
    }

    #[test]
    fn key_len_controls_output_length() {
        let params = Params {
            key_len: 64,
            ..cheap(&[1u8; 16])
        };
        assert_eq!(derive_key("pw", &params).unwrap().len(), 64);
    }

    #[test]
    fn kdf_invalid_params_fail_gracefully() {
        let short_key = Params {
            key_len: 2,
            ..cheap(&[1u8; 16])
        };
        assert!(matches!(
            derive_key("pw", &short_key),
            Err(Error::KeyDerivation(_))
        ));

        let short_salt = cheap(&[1u8; 4]);
        assert!(matches!(
            derive_key("pw", &short_salt),
            Err(Error::KeyDerivation(_))
        ));
    }

    #[test]
    fn huge_parallelism_is_rejected_without_overflow() {
        for p in [argon2::Params::MAX_P_COST + 1, 1 << 29, u32::MAX] {
            let params = Params {
                parallelism: p,
                ..cheap(&[1u8; 16])
            };
            assert!(matches!(
                derive_key("pw", &params),
                Err(Error::KeyDerivation(_))
            ));
        }
    }

    #[test]
    fn default_config_matches_fixed_costs() {
        let config = HashConfig::default();
        assert_eq!(config.time_cost(), 1);
        assert_eq!(config.mem_cost_kib(), 65536);
        assert_eq!(config.key_len(), 32);
        assert_eq!(config.salt_len(), 16);
        assert!(config.parallelism() >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_out_of_range_values() {
        assert!(HashConfig::new(0, 65536, 1, 32, 16).is_err());
        assert!(HashConfig::new(1, 65536, 0, 32, 16).is_err());
        assert!(HashConfig::new(1, 8, 2, 32, 16).is_err());
        assert!(HashConfig::new(1, 65536, 1, 3, 16).is_err());
        assert!(HashConfig::new(1, 65536, 1, 32, 4).is_err());
        assert!(HashConfig::new(1, u32::MAX, u32::MAX, 32, 16).is_err());
        assert!(HashConfig::new(1, 64, 1, 4, 8).is_ok());
    }
}
