//! Blog example: scanning posts and comments out of Arrow record batches
//!
//! A query engine hands back `RecordBatch`es; rowscan maps their columns onto
//! plain structs, by snake_case name or through an explicit column annotation.
//!
//! Run: cargo run --example blog
//!
//! With debug output:
//!   RUST_LOG=rowscan=trace cargo run --example blog

use std::sync::Arc;

use rowscan::{
    arrow::{
        array::{ArrayRef, BooleanArray, Int64Array, RecordBatch, StringArray},
        datatypes::{DataType, Field, Schema},
    },
    records, scan_rows, Record, RecordBatchRows,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Record, Debug, Default)]
struct BlogPost {
    id: i64,
    title: String,
    #[record(column = "user_id")]
    author_id: i64,
    published: Option<bool>,
}

#[derive(Record, Debug, Default)]
struct BlogComment {
    id: i64,
    #[record(column = "post_id")]
    blog_post_id: i64,
    comment: String,
}

fn posts() -> Result<RecordBatch, Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("user_id", DataType::Int64, false),
        Field::new("published", DataType::Boolean, true),
        // not part of BlogPost, discarded while scanning
        Field::new("word_count", DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![1234, 1235])) as ArrayRef,
            Arc::new(StringArray::from(vec!["Hello rowscan", "Drafts"])),
            Arc::new(Int64Array::from(vec![7, 7])),
            Arc::new(BooleanArray::from(vec![Some(true), None])),
            Arc::new(Int64Array::from(vec![512, 64])),
        ],
    )?;

    Ok(batch)
}

fn comments() -> Result<RecordBatch, Box<dyn std::error::Error>> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("post_id", DataType::Int64, false),
        Field::new("comment", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef,
            Arc::new(Int64Array::from(vec![1234, 1234, 1235])),
            Arc::new(StringArray::from(vec!["first!", "nice post", "typo in line 2"])),
        ],
    )?;

    Ok(batch)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,rowscan=debug")),
        )
        .init();

    let mut posts_rows = RecordBatchRows::from(posts()?);
    let mut posts: Vec<BlogPost> = Vec::new();
    scan_rows(&mut posts_rows, &mut posts)?;

    let mut comment_rows = RecordBatchRows::from(comments()?);
    let comments = records::<BlogComment, _>(&mut comment_rows).collect::<Result<Vec<_>, _>>()?;

    for post in &posts {
        println!(
            "#{} {:?} by user {} (published: {:?})",
            post.id, post.title, post.author_id, post.published
        );
        for comment in comments.iter().filter(|c| c.blog_post_id == post.id) {
            println!("    #{}: {}", comment.id, comment.comment);
        }
    }

    Ok(())
}
