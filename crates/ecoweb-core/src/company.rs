//! Company registration form.

use crate::validation::{ValidationErrors, digits_only, is_blank};
use serde::Serialize;
use std::fmt;

const MIN_PASSWORD_LEN: usize = 8;

/// Raw registration form, one string per input.
#[derive(Debug, Clone, Default)]
pub struct CompanyRegistrationForm {
    pub name: String,
    pub cnpj: String,
    pub responsible_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub cep: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration payload that passed validation. CNPJ and CEP are digits only.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRegistration {
    pub name: String,
    pub cnpj: String,
    pub phone: String,
    pub location: String,
    pub cep: String,
    pub email: String,
    pub responsible_name: String,
    pub password: String,
}

impl fmt::Debug for CompanyRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompanyRegistration")
            .field("name", &self.name)
            .field("cnpj", &self.cnpj)
            .field("email", &self.email)
            .field("password", &"***")
            .finish_non_exhaustive()
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

impl CompanyRegistrationForm {
    pub fn validate(&self) -> Result<CompanyRegistration, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.name) {
            errors.add("name", "Nome da empresa é obrigatório");
        }

        let cnpj = digits_only(&self.cnpj);
        if is_blank(&self.cnpj) {
            errors.add("cnpj", "CNPJ é obrigatório");
        } else if cnpj.len() != 14 {
            errors.add("cnpj", "CNPJ deve ter 14 dígitos");
        }

        if is_blank(&self.responsible_name) {
            errors.add("responsibleName", "Nome do responsável é obrigatório");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Email é obrigatório");
        } else if !looks_like_email(email) {
            errors.add("email", "Email inválido");
        }

        if is_blank(&self.phone) {
            errors.add("phone", "Telefone é obrigatório");
        }
        if is_blank(&self.location) {
            errors.add("location", "Endereço é obrigatório");
        }

        let cep = digits_only(&self.cep);
        if is_blank(&self.cep) {
            errors.add("cep", "CEP é obrigatório");
        } else if cep.len() != 8 {
            errors.add("cep", "CEP deve ter 8 dígitos");
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", "A senha deve ter pelo menos 8 caracteres");
        }
        if self.password != self.confirm_password {
            errors.add("confirmPassword", "As senhas não coincidem");
        }

        errors.into_result(CompanyRegistration {
            name: self.name.trim().to_string(),
            cnpj,
            phone: self.phone.trim().to_string(),
            location: self.location.trim().to_string(),
            cep,
            email: email.to_string(),
            responsible_name: self.responsible_name.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
