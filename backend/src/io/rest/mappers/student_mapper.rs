use serde::Deserialize;
use serde_json::Value;
use shared::{CreateStudentRequest, Payment as SharedPayment, Student as SharedStudent};

use crate::domain::commands::payments::UpdatePaymentCommand;
use crate::domain::commands::students::CreateStudentCommand;
use crate::domain::models::{DomainPayment, DomainStudent};

/// Raw body of `PUT /api/students/:id/payment`.
///
/// Fields stay untyped here so that a bad month or status surfaces as a
/// domain validation error with a precise message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdateBody {
    #[serde(default)]
    pub month: Option<Value>,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    /// Accepted for compatibility, the server stamps its own time
    #[serde(default)]
    pub paid_at: Option<Value>,
}

/// Mapper between shared Student/Payment DTOs and domain models
pub struct StudentMapper;

impl StudentMapper {
    pub fn to_dto(domain: DomainStudent) -> SharedStudent {
        SharedStudent {
            id: domain.id,
            name: domain.name,
            phone: domain.phone,
            payments: domain.payments.into_iter().map(Self::payment_to_dto).collect(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn payment_to_dto(domain: DomainPayment) -> SharedPayment {
        SharedPayment {
            id: domain.id,
            student_id: domain.student_id,
            month: domain.period.month,
            year: domain.period.year,
            status: domain.status,
            paid_at: domain.paid_at,
        }
    }

    pub fn to_create_command(dto: CreateStudentRequest) -> CreateStudentCommand {
        CreateStudentCommand {
            name: dto.name,
            phone: dto.phone,
        }
    }

    pub fn to_payment_command(student_id: String, body: PaymentUpdateBody) -> UpdatePaymentCommand {
        UpdatePaymentCommand {
            student_id,
            month: body.month.and_then(value_to_text),
            year: body.year.and_then(value_to_text),
            status: body.status.and_then(value_to_text),
        }
    }
}

/// Textual form of a JSON scalar; null counts as absent
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
