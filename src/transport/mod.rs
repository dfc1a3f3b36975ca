//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod messages;
mod rest_error;
mod verify;

pub use messages::{decode_message_json_response, encode_create_message_form};
pub use rest_error::decode_rest_error;
pub use verify::{
    decode_verification_json_response, encode_verification_check_form, encode_verification_form,
};
