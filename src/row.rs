//! Row serialization.
//!
//! A row is the fixed tuple `(id, username, email)`. `username` and `email`
//! are stored as zero-padded, null-terminated fixed-size fields, one byte
//! wider than the maximum text length they hold, mirroring the original
//! tutorial's `char username[COLUMN_USERNAME_SIZE + 1]` layout.
use std::{fmt, str::FromStr};

use crate::errors::PrepareError;

pub const ID_SIZE: usize = std::mem::size_of::<u32>();
pub const MAX_USERNAME_CHARS: usize = 32;
pub const MAX_EMAIL_CHARS: usize = 255;
pub const USERNAME_SIZE: usize = MAX_USERNAME_CHARS + 1;
pub const EMAIL_SIZE: usize = MAX_EMAIL_CHARS + 1;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

#[derive(Clone)]
pub struct Row {
    pub id: u32,
    username: [u8; USERNAME_SIZE],
    email: [u8; EMAIL_SIZE],
}

impl Row {
    pub fn new(id: u32, username: &str, email: &str) -> Self {
        let mut username_bytes = [0u8; USERNAME_SIZE];
        username_bytes[..username.len()].copy_from_slice(username.as_bytes());

        let mut email_bytes = [0u8; EMAIL_SIZE];
        email_bytes[..email.len()].copy_from_slice(email.as_bytes());

        Self {
            id,
            username: username_bytes,
            email: email_bytes,
        }
    }

    pub fn username(&self) -> String {
        String::from_utf8_lossy(&self.username)
            .trim_end_matches(char::from(0))
            .to_string()
    }

    pub fn email(&self) -> String {
        String::from_utf8_lossy(&self.email)
            .trim_end_matches(char::from(0))
            .to_string()
    }

    pub fn serialize(&self) -> [u8; ROW_SIZE] {
        let mut row = [0u8; ROW_SIZE];

        let start = 0;
        let end = ID_SIZE;
        row[start..end].copy_from_slice(&self.id.to_le_bytes());

        let start = end;
        let end = start + USERNAME_SIZE;
        row[start..end].copy_from_slice(&self.username);

        let start = end;
        let end = start + EMAIL_SIZE;
        row[start..end].copy_from_slice(&self.email);

        row
    }

    pub fn deserialize(bytes: &[u8]) -> Self {
        let start = 0;
        let end = ID_SIZE;
        let mut id_bytes = [0u8; ID_SIZE];
        id_bytes.copy_from_slice(&bytes[start..end]);
        let id = u32::from_le_bytes(id_bytes);

        let start = end;
        let end = start + USERNAME_SIZE;
        let mut username = [0u8; USERNAME_SIZE];
        username.copy_from_slice(&bytes[start..end]);

        let start = end;
        let end = start + EMAIL_SIZE;
        let mut email = [0u8; EMAIL_SIZE];
        email.copy_from_slice(&bytes[start..end]);

        Self {
            id,
            username,
            email,
        }
    }
}

impl FromStr for Row {
    type Err = PrepareError;

    fn from_str(args: &str) -> Result<Self, Self::Err> {
        let columns: Vec<&str> = args.split_whitespace().collect();
        let [id, username, email] = columns[..] else {
            return Err(PrepareError::SyntaxError);
        };

        if id.starts_with('-') {
            return Err(PrepareError::InvalidId);
        }
        let id: u32 = id.parse().map_err(|_| PrepareError::InvalidId)?;

        if username.len() > MAX_USERNAME_CHARS || email.len() > MAX_EMAIL_CHARS {
            return Err(PrepareError::StringTooLong);
        }

        Ok(Self::new(id, username, email))
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username(), self.email())
    }
}
