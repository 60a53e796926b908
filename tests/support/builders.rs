// tests/support/builders.rs
use article_service::application::commands::articles::{
    CreateArticleCommand, UpdateArticleCommand,
};

/// タイトルとタグから作成コマンドを組み立てる
pub fn create_command(title: &str, tags: &[&str]) -> CreateArticleCommand {
    let mut builder = CreateArticleCommand::builder()
        .title(title)
        .description(format!("about {title}"))
        .body("content");
    for tag in tags {
        builder = builder.tag(*tag);
    }
    builder.build().expect("complete create command")
}

/// 何も変更しない更新コマンド。必要なフィールドだけ上書きして使う
pub fn update_command(slug: &str) -> UpdateArticleCommand {
    UpdateArticleCommand {
        slug: slug.to_string(),
        title: None,
        description: None,
        body: None,
        tag_list: None,
    }
}
