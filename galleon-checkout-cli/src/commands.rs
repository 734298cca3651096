use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Subcommand, ValueEnum};
use galleon_checkout_sdk::objects::auth::{AuthenticateRequest, AuthenticateResponse};
use galleon_checkout_sdk::objects::catalog::{
    PaymentMethodDefinitionsRequest, PaymentMethodDefinitionsResponse,
};
use galleon_checkout_sdk::objects::receipt::{ValidateReceiptRequest, ValidateReceiptResponse};
use galleon_checkout_sdk::objects::session::{
    CancelCheckoutSessionRequest, CancelCheckoutSessionResponse, ChargeRequest, ChargeResponse,
    CreateCheckoutSessionRequest, CreateCheckoutSessionResponse,
};
use galleon_checkout_sdk::objects::tax::{TaxRequest, TaxResponse};
use galleon_checkout_sdk::objects::user::{
    InitializeRequest, InitializeResponse, UpdateEmailRequest, UpdateEmailResponse,
};
use galleon_checkout_sdk::objects::vault::{
    RemovePaymentMethodRequest, RemovePaymentMethodResponse, VaultPaymentMethodRequest,
    VaultPaymentMethodResponse,
};
use galleon_checkout_sdk::objects::{PaymentMethodDefinition, UserPaymentMethod};
use galleon_checkout_sdk::{CodecError, Family, MessageError, TaggedCodec, config};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a payment method definition and print it re-encoded
    Definition {
        /// JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Decode a user payment method and print it re-encoded
    UserMethod {
        /// JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Decode a contract message and print it re-encoded
    Message {
        #[arg(value_enum)]
        kind: MessageKind,
        /// JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Print the active vocabulary as TOML
    Vocabulary,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    AuthenticateRequest,
    AuthenticateResponse,
    InitializeRequest,
    InitializeResponse,
    UpdateEmailRequest,
    UpdateEmailResponse,
    PaymentMethodDefinitionsRequest,
    PaymentMethodDefinitionsResponse,
    CreateCheckoutSessionRequest,
    CreateCheckoutSessionResponse,
    ChargeRequest,
    ChargeResponse,
    CancelCheckoutSessionRequest,
    CancelCheckoutSessionResponse,
    VaultPaymentMethodRequest,
    VaultPaymentMethodResponse,
    RemovePaymentMethodRequest,
    RemovePaymentMethodResponse,
    ValidateReceiptRequest,
    ValidateReceiptResponse,
    TaxRequest,
    TaxResponse,
}

impl MessageKind {
    /// Decode `document` as this message and encode it back.
    pub fn normalize(self, codec: &TaggedCodec, document: Value) -> Result<Value, MessageError> {
        match self {
            MessageKind::AuthenticateRequest => {
                normalize_message::<AuthenticateRequest>(codec, document)
            }
            MessageKind::AuthenticateResponse => {
                normalize_message::<AuthenticateResponse>(codec, document)
            }
            MessageKind::InitializeRequest => {
                normalize_message::<InitializeRequest>(codec, document)
            }
            MessageKind::InitializeResponse => {
                normalize_message::<InitializeResponse>(codec, document)
            }
            MessageKind::UpdateEmailRequest => {
                normalize_message::<UpdateEmailRequest>(codec, document)
            }
            MessageKind::UpdateEmailResponse => {
                normalize_message::<UpdateEmailResponse>(codec, document)
            }
            MessageKind::PaymentMethodDefinitionsRequest => {
                normalize_message::<PaymentMethodDefinitionsRequest>(codec, document)
            }
            MessageKind::PaymentMethodDefinitionsResponse => {
                normalize_message::<PaymentMethodDefinitionsResponse>(codec, document)
            }
            MessageKind::CreateCheckoutSessionRequest => {
                normalize_message::<CreateCheckoutSessionRequest>(codec, document)
            }
            MessageKind::CreateCheckoutSessionResponse => {
                normalize_message::<CreateCheckoutSessionResponse>(codec, document)
            }
            MessageKind::ChargeRequest => normalize_message::<ChargeRequest>(codec, document),
            MessageKind::ChargeResponse => normalize_message::<ChargeResponse>(codec, document),
            MessageKind::CancelCheckoutSessionRequest => {
                normalize_message::<CancelCheckoutSessionRequest>(codec, document)
            }
            MessageKind::CancelCheckoutSessionResponse => {
                normalize_message::<CancelCheckoutSessionResponse>(codec, document)
            }
            MessageKind::VaultPaymentMethodRequest => {
                normalize_message::<VaultPaymentMethodRequest>(codec, document)
            }
            MessageKind::VaultPaymentMethodResponse => {
                normalize_message::<VaultPaymentMethodResponse>(codec, document)
            }
            MessageKind::RemovePaymentMethodRequest => {
                normalize_message::<RemovePaymentMethodRequest>(codec, document)
            }
            MessageKind::RemovePaymentMethodResponse => {
                normalize_message::<RemovePaymentMethodResponse>(codec, document)
            }
            MessageKind::ValidateReceiptRequest => {
                normalize_message::<ValidateReceiptRequest>(codec, document)
            }
            MessageKind::ValidateReceiptResponse => {
                normalize_message::<ValidateReceiptResponse>(codec, document)
            }
            MessageKind::TaxRequest => normalize_message::<TaxRequest>(codec, document),
            MessageKind::TaxResponse => normalize_message::<TaxResponse>(codec, document),
        }
    }
}

/// Run `command` and return what should be printed.
pub fn run(command: Command, codec: &TaggedCodec) -> anyhow::Result<String> {
    let output = match command {
        Command::Definition { input } => {
            let document = read_document(&input)?;
            let normalized = normalize_member::<PaymentMethodDefinition>(codec, &document)?;
            serde_json::to_string_pretty(&normalized)?
        }
        Command::UserMethod { input } => {
            let document = read_document(&input)?;
            let normalized = normalize_member::<UserPaymentMethod>(codec, &document)?;
            serde_json::to_string_pretty(&normalized)?
        }
        Command::Message { kind, input } => {
            let document = kind
                .normalize(codec, read_document(&input)?)
                .with_context(|| format!("invalid {kind:?}"))?;
            serde_json::to_string_pretty(&document)?
        }
        Command::Vocabulary => config::render(codec.registry())?,
    };
    Ok(output)
}

fn normalize_member<F: Family>(codec: &TaggedCodec, document: &Value) -> Result<Value, CodecError> {
    let member: F = codec.decode(document)?;
    codec.encode(&member)
}

fn normalize_message<M: Serialize + DeserializeOwned>(
    codec: &TaggedCodec,
    document: Value,
) -> Result<Value, MessageError> {
    let message: M = codec.decode_message(document)?;
    codec.encode_message(&message)
}

fn read_document(input: &Path) -> anyhow::Result<Value> {
    let content = if input == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("{} is not JSON", input.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_normalization() {
        let codec = TaggedCodec::standard();
        let normalized = normalize_member::<UserPaymentMethod>(
            &codec,
            &json!({"type": "gpay", "id": "pm_1", "email": "a@example.com", "extra": 1}),
        )
        .unwrap();
        assert_eq!(
            normalized,
            json!({"type": "google_pay", "id": "pm_1", "email": "a@example.com"})
        );

        assert_eq!(
            normalize_member::<PaymentMethodDefinition>(&codec, &json!({"type": "bogus_method"})),
            Err(CodecError::UnknownVariant("bogus_method".to_string()))
        );
    }

    #[test]
    fn test_message_normalization_with_remapped_vocabulary() {
        let registry = config::parse(
            r#"
[user_payment_method.google_pay]
name = "gpay"
aliases = ["google_pay"]
"#,
        )
        .unwrap();
        let codec = TaggedCodec::new(registry);
        let normalized = MessageKind::VaultPaymentMethodResponse
            .normalize(
                &codec,
                json!({"payment_method": {"type": "google_pay", "id": "pm_2"}}),
            )
            .unwrap();
        assert_eq!(
            normalized,
            json!({"user_payment_method": {"type": "gpay", "id": "pm_2"}})
        );

        let err = MessageKind::VaultPaymentMethodResponse
            .normalize(&codec, json!({"user_payment_method": {"type": "paypal"}}))
            .unwrap_err();
        assert_eq!(err.codec_error(), Some(&CodecError::UnknownVariant("paypal".to_string())));
    }

    #[test]
    fn test_message_kind_names() {
        assert_eq!(
            MessageKind::from_str("payment-method-definitions-response", false),
            Ok(MessageKind::PaymentMethodDefinitionsResponse)
        );
    }

    #[test]
    fn test_vocabulary_command() {
        let output = run(Command::Vocabulary, &TaggedCodec::standard()).unwrap();
        assert!(output.contains("[payment_method_definition.google_pay]"));
        assert!(output.contains("[user_payment_method.paypal]"));
    }
}
