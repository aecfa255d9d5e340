//! 用户数据模型

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::core::error::CoreError;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub age: Option<f64>,
    /// `data:image/<ext>;base64,...`，没有上传图片时为空串
    pub file: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn age_label(&self) -> String {
        self.age.map(|age| age.to_string()).unwrap_or_default()
    }

    pub fn created_label(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn updated_label(&self) -> String {
        self.updated_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default()
    }
}

/// 新建记录
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub age: Option<f64>,
    pub file: String,
}

/// 更新只改 name 和 age，图片创建后不可替换
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub name: String,
    pub age: Option<f64>,
}

/// 表单原始字段
#[derive(Debug, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
}

/// 经过类型转换和校验的字段
#[derive(Debug, Clone, Validate)]
pub struct UserFields {
    pub name: String,
    #[validate(custom(function = "validate_age"))]
    pub age: Option<f64>,
}

fn validate_age(age: f64) -> Result<(), ValidationError> {
    if age.is_finite() {
        Ok(())
    } else {
        let mut err = ValidationError::new("finite");
        err.message = Some(Cow::from("Age must be a finite number"));
        Err(err)
    }
}

impl TryFrom<UserForm> for UserFields {
    type Error = CoreError;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        let age = match form.age.trim() {
            "" => None,
            raw => Some(raw.parse::<f64>().map_err(|_| {
                CoreError::BadRequest(format!("Age must be a number, got {:?}", raw))
            })?),
        };

        let fields = UserFields {
            name: form.name,
            age,
        };
        fields.validate()?;
        Ok(fields)
    }
}

impl From<UserFields> for UserUpdate {
    fn from(fields: UserFields) -> Self {
        Self {
            name: fields.name,
            age: fields.age,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, age: &str) -> UserForm {
        UserForm {
            name: name.to_string(),
            age: age.to_string(),
        }
    }

    #[test]
    fn test_fields_from_form() {
        let fields = UserFields::try_from(form("Alice", " 30 ")).unwrap();
        assert_eq!(fields.name, "Alice");
        assert_eq!(fields.age, Some(30.0));

        let fields = UserFields::try_from(form("", "")).unwrap();
        assert_eq!(fields.name, "");
        assert_eq!(fields.age, None);
    }

    #[test]
    fn test_non_numeric_age_is_rejected() {
        let err = UserFields::try_from(form("Bob", "thirty")).unwrap_err();
        assert!(matches!(err, CoreError::BadRequest(_)));
    }

    #[test]
    fn test_non_finite_age_is_rejected() {
        for raw in ["NaN", "inf", "-infinity"] {
            let err = UserFields::try_from(form("Bob", raw)).unwrap_err();
            assert!(matches!(err, CoreError::BadRequest(_)), "{raw} accepted");
        }
    }

    #[test]
    fn test_age_validation_runs_on_present_values() {
        let fields = UserFields {
            name: "Carol".to_string(),
            age: Some(f64::NAN),
        };
        assert!(fields.validate().is_err());

        let fields = UserFields {
            name: "Carol".to_string(),
            age: Some(-3.5),
        };
        assert!(fields.validate().is_ok());

        let fields = UserFields {
            name: "Carol".to_string(),
            age: None,
        };
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_labels() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            age: Some(30.0),
            file: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        };
        assert_eq!(user.age_label(), "30");
        assert_eq!(user.updated_label(), "");

        let user = User {
            age: Some(30.5),
            ..user
        };
        assert_eq!(user.age_label(), "30.5");
    }
}
