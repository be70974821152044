use derive_more::{AsRef, Display, From};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Login credentials of a single student account.
#[derive(Debug, TypedBuilder, Serialize, Deserialize)]
pub struct Credentials {
    pub student_id: StudentId,
    pub password: Password,
}

/// The student number, e.g. `102300000`.
#[derive(Clone, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct StudentId(String);

#[derive(From, AsRef, Serialize, Deserialize)]
#[as_ref(forward)]
pub struct Password(String);

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(..)")
    }
}
