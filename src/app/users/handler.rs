//! 用户处理器

use axum::{
    extract::{Multipart, Path, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;

use super::{
    model::{UserFields, UserForm},
    service::{Upload, UserService},
    view::{DetailView, IndexView, SearchView, UpdateView},
};
use crate::core::{
    error::CoreError,
    response::{redirect_home, HtmlTemplate},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub name: String,
}

pub async fn list_first_page(
    State(state): State<AppState>,
) -> Result<HtmlTemplate<IndexView>, CoreError> {
    let page = state.user_service.page(1).await?;
    Ok(HtmlTemplate(IndexView::from(page)))
}

pub async fn list_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<HtmlTemplate<IndexView>, CoreError> {
    let page = parse_page(&page)?;
    let page = state.user_service.page(page).await?;
    Ok(HtmlTemplate(IndexView::from(page)))
}

pub async fn show_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<HtmlTemplate<DetailView>, CoreError> {
    let user = state.user_service.get_user(&id).await?;
    Ok(HtmlTemplate(DetailView { user }))
}

pub async fn create_user(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, CoreError> {
    let (form, upload) = read_upload_form(multipart).await?;
    let fields = UserFields::try_from(form)?;
    state.user_service.create_user(fields, upload).await?;
    Ok(redirect_home())
}

pub async fn edit_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<HtmlTemplate<UpdateView>, CoreError> {
    let user = state.user_service.get_user(&id).await?;
    Ok(HtmlTemplate(UpdateView { user }))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UserForm>,
) -> Result<Redirect, CoreError> {
    let fields = UserFields::try_from(form)?;
    state.user_service.update_user(&id, fields).await?;
    Ok(redirect_home())
}

pub async fn remove_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, CoreError> {
    state.user_service.remove_user(&id).await?;
    Ok(redirect_home())
}

pub async fn remove_all(State(state): State<AppState>) -> Result<Redirect, CoreError> {
    state.user_service.remove_all().await?;
    Ok(redirect_home())
}

pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<HtmlTemplate<SearchView>, CoreError> {
    let users = state.user_service.search(&form.name).await?;
    Ok(HtmlTemplate(SearchView {
        query: form.name,
        users,
    }))
}

/// 页码必须是正整数
fn parse_page(raw: &str) -> Result<u64, CoreError> {
    match raw.parse::<u64>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(CoreError::BadRequest(format!(
            "Page must be a positive integer, got {:?}",
            raw
        ))),
    }
}

/// 读取 `name`、`age` 和 `file` 三个部分，其余部分忽略
async fn read_upload_form(
    mut multipart: Multipart,
) -> Result<(UserForm, Option<Upload>), CoreError> {
    let mut form = UserForm::default();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => form.name = field.text().await?,
            "age" => form.age = field.text().await?,
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                upload = Some(Upload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {
                // 未知部分也要读完，超限时同样报 413
                field.bytes().await?;
            }
        }
    }

    Ok((form, upload))
}
