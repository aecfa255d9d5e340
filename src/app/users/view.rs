//! 页面模板
//!
//! 每个视图只依赖传入的数据；记录不存在时渲染提示而不是报错。

use askama::Template;

use super::model::User;
use super::service::UserPage;

#[derive(Debug, Clone)]
pub struct PageLink {
    pub number: u64,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView {
    pub users: Vec<User>,
    pub current: u64,
    pub pages: u64,
    pub page_links: Vec<PageLink>,
}

impl From<UserPage> for IndexView {
    fn from(page: UserPage) -> Self {
        let page_links = (1..=page.pages)
            .map(|number| PageLink {
                number,
                active: number == page.current,
            })
            .collect();

        Self {
            users: page.users,
            current: page.current,
            pages: page.pages,
            page_links,
        }
    }
}

#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailView {
    pub user: Option<User>,
}

#[derive(Template)]
#[template(path = "update.html")]
pub struct UpdateView {
    pub user: Option<User>,
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchView {
    pub query: String,
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            age: Some(42.0),
            file: "data:image/png;base64,AQID".to_string(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_index_page_links() {
        let view = IndexView::from(UserPage {
            users: vec![user("Alice")],
            current: 2,
            pages: 3,
        });
        let active: Vec<_> = view.page_links.iter().map(|l| l.active).collect();
        assert_eq!(active, vec![false, true, false]);

        let html = view.render().unwrap();
        assert!(html.contains("Alice"));
        assert!(html.contains("href=\"/3\""));
        assert!(html.contains("data:image/png;base64,AQID"));
    }

    #[test]
    fn test_names_are_escaped() {
        let view = SearchView {
            query: "<b>".to_string(),
            users: vec![user("<script>alert(1)</script>")],
        };
        let html = view.render().unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_missing_user_renders() {
        let html = DetailView { user: None }.render().unwrap();
        assert!(html.contains("No such user"));

        let html = UpdateView { user: None }.render().unwrap();
        assert!(html.contains("No such user"));
    }

    #[test]
    fn test_update_form_is_prefilled() {
        let alice = user("Alice");
        let id = alice.id;
        let html = UpdateView { user: Some(alice) }.render().unwrap();
        assert!(html.contains(&format!("action=\"/update/{}\"", id)));
        assert!(html.contains("value=\"Alice\""));
        assert!(html.contains("value=\"42\""));
    }
}
