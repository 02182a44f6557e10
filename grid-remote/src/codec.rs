use bincode::error::{DecodeError, EncodeError};
use bincode::{Decode, Encode};

pub fn encode_bytes<T>(value: &T) -> Result<Vec<u8>, EncodeError>
where
    T: Encode,
{
    bincode::encode_to_vec(value, bincode::config::standard())
}

pub fn decode_bytes<T>(bytes: &[u8]) -> Result<T, DecodeError>
where
    T: Decode,
{
    bincode::decode_from_slice(bytes, bincode::config::standard()).map(|(t, _)| t)
}
