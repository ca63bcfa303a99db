//! Integration tests for the GraphQL resolution graph
//!
//! Runs queries and mutations against the schema over an in-memory store,
//! covering root lookups, relation resolution across foreign keys, partial
//! updates, non-cascading deletes and field-level error reporting.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use bookshelf_api::repositories::{
    DocumentStore, Fields, Filter, RawDocument, StoreError, StoreResult,
};
use bookshelf_api::{build_schema, MemoryDocumentStore, StoreRegistry};
use common::*;

#[tokio::test]
async fn test_tolkien_end_to_end() {
    let schema = memory_schema();

    let author_id = add_author(&schema, "Tolkien", "UK").await;
    let book_id = add_book(&schema, "LOTR", Some(&author_id)).await;

    let query = format!(r#"{{ book(id: "{book_id}") {{ title author {{ name }} }} }}"#);
    let data = run_ok(&schema, query.as_str()).await;
    assert_eq!(
        data["book"],
        json!({"title": "LOTR", "author": {"name": "Tolkien"}})
    );

    run_ok(
        &schema,
        format!(r#"mutation {{ deleteAuthor(id: "{author_id}") {{ id }} }}"#),
    )
    .await;

    let data = run_ok(&schema, query.as_str()).await;
    assert_eq!(data["book"], json!({"title": "LOTR", "author": null}));
}

#[tokio::test]
async fn test_lookup_returns_inserted_scalars() {
    let schema = memory_schema();

    let data = run_ok(
        &schema,
        r#"mutation { addAuthor(name: "Le Guin", country: "US") { id name country createdAt updatedAt } }"#,
    )
    .await;
    let added = &data["addAuthor"];
    assert_eq!(added["createdAt"], added["updatedAt"]);

    let id = id_of(added);
    let data = run_ok(
        &schema,
        format!(r#"{{ author(id: "{id}") {{ id name country createdAt updatedAt }} }}"#),
    )
    .await;
    assert_eq!(&data["author"], added);
}

#[tokio::test]
async fn test_missing_records_resolve_to_null_without_errors() {
    let schema = memory_schema();
    let id = Uuid::new_v4();

    let data = run_ok(
        &schema,
        format!(
            r#"{{
                author(id: "{id}") {{ id }}
                book(id: "{id}") {{ id }}
                user(id: "{id}") {{ id }}
                comment(id: "{id}") {{ id }}
                noArgument: author {{ id }}
            }}"#
        ),
    )
    .await;

    assert_eq!(
        data,
        json!({"author": null, "book": null, "user": null, "comment": null, "noArgument": null})
    );
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(5)]
#[tokio::test]
async fn test_listing_returns_every_record(#[case] count: usize) {
    let schema = memory_schema();
    for i in 0..count {
        add_user(&schema, &format!("reader-{i}")).await;
    }

    let data = run_ok(&schema, "{ users { id name } }").await;
    let users = data["users"].as_array().expect("users is a list");
    assert_eq!(users.len(), count);

    let mut expected: Vec<String> = (0..count).map(|i| format!("reader-{i}")).collect();
    expected.sort();
    assert_eq!(sorted_field(&data["users"], "name"), expected);
}

#[tokio::test]
async fn test_has_many_and_belongs_to_agree() {
    let schema = memory_schema();

    let tolkien = add_author(&schema, "Tolkien", "UK").await;
    let herbert = add_author(&schema, "Herbert", "US").await;
    let hobbit = add_book(&schema, "The Hobbit", Some(&tolkien)).await;
    let lotr = add_book(&schema, "LOTR", Some(&tolkien)).await;
    add_book(&schema, "Dune", Some(&herbert)).await;
    add_book(&schema, "Orphan", None).await;

    let data = run_ok(
        &schema,
        format!(r#"{{ author(id: "{tolkien}") {{ books {{ id title authorId }} }} }}"#),
    )
    .await;
    let books = &data["author"]["books"];
    assert_eq!(sorted_field(books, "title"), vec!["LOTR", "The Hobbit"]);
    let mut expected = vec![hobbit, lotr];
    expected.sort();
    assert_eq!(sorted_field(books, "id"), expected);
    assert!(books
        .as_array()
        .unwrap()
        .iter()
        .all(|book| book["authorId"] == json!(tolkien)));

    // Every book resolves its own author, one lookup per book
    let data = run_ok(&schema, "{ books { title authorId author { name } } }").await;
    for book in data["books"].as_array().unwrap() {
        let expected = match book["title"].as_str().unwrap() {
            "Dune" => json!({"name": "Herbert"}),
            "Orphan" => Value::Null,
            _ => json!({"name": "Tolkien"}),
        };
        assert_eq!(
            field(book, "author"),
            Some(&expected),
            "author of {}",
            book["title"]
        );
    }
}

#[tokio::test]
async fn test_comment_graph_round_trip() {
    let schema = memory_schema();

    let author = add_author(&schema, "Tolkien", "UK").await;
    let book = add_book(&schema, "LOTR", Some(&author)).await;
    let reader = add_user(&schema, "Sam").await;
    let other = add_user(&schema, "Frodo").await;
    add_comment(&schema, "Loved it", &book, &reader).await;
    add_comment(&schema, "Too long", &book, &other).await;

    let data = run_ok(
        &schema,
        format!(
            r#"{{ user(id: "{reader}") {{
                name
                comments {{ head body book {{ title author {{ name }} }} user {{ name }} }}
            }} }}"#
        ),
    )
    .await;
    assert_eq!(
        data["user"],
        json!({
            "name": "Sam",
            "comments": [{
                "head": "Loved it",
                "body": "about Loved it",
                "book": {"title": "LOTR", "author": {"name": "Tolkien"}},
                "user": {"name": "Sam"},
            }],
        })
    );

    let data = run_ok(
        &schema,
        format!(r#"{{ book(id: "{book}") {{ comments {{ head user {{ name }} }} }} }}"#),
    )
    .await;
    assert_eq!(
        sorted_field(&data["book"]["comments"], "head"),
        vec!["Loved it", "Too long"]
    );
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let schema = memory_schema();
    let id = add_author(&schema, "Tolkien", "UK").await;

    let before = run_ok(
        &schema,
        format!(r#"{{ author(id: "{id}") {{ createdAt }} }}"#),
    )
    .await;

    let data = run_ok(
        &schema,
        format!(
            r#"mutation {{ updateAuthor(id: "{id}", name: "J.R.R. Tolkien") {{ id name country createdAt }} }}"#
        ),
    )
    .await;
    assert_eq!(
        data["updateAuthor"],
        json!({
            "id": id,
            "name": "J.R.R. Tolkien",
            "country": "UK",
            "createdAt": before["author"]["createdAt"],
        })
    );

    // Explicit null clears the field, omitted fields stay untouched
    let data = run_ok(
        &schema,
        format!(r#"mutation {{ updateAuthor(id: "{id}", country: null) {{ name country }} }}"#),
    )
    .await;
    assert_eq!(
        data["updateAuthor"],
        json!({"name": "J.R.R. Tolkien", "country": null})
    );
}

#[tokio::test]
async fn test_updating_foreign_key_moves_relation() {
    let schema = memory_schema();
    let first = add_author(&schema, "First", "FR").await;
    let second = add_author(&schema, "Second", "DE").await;
    let book = add_book(&schema, "Shared", Some(&first)).await;

    let data = run_ok(
        &schema,
        format!(
            r#"mutation {{ updateBook(id: "{book}", authorId: "{second}") {{ title author {{ name }} }} }}"#
        ),
    )
    .await;
    assert_eq!(
        data["updateBook"],
        json!({"title": "Shared", "author": {"name": "Second"}})
    );

    let data = run_ok(
        &schema,
        format!(
            r#"{{
                first: author(id: "{first}") {{ books {{ id }} }}
                second: author(id: "{second}") {{ books {{ id }} }}
            }}"#
        ),
    )
    .await;
    assert_eq!(data["first"]["books"], json!([]));
    assert_eq!(data["second"]["books"], json!([{"id": book}]));

    let data = run_ok(
        &schema,
        format!(r#"mutation {{ updateBook(id: "{book}", authorId: null) {{ authorId author {{ name }} }} }}"#),
    )
    .await;
    assert_eq!(data["updateBook"], json!({"authorId": null, "author": null}));
}

#[tokio::test]
async fn test_updating_comment_references_moves_relations() {
    let schema = memory_schema();
    let first_book = add_book(&schema, "First", None).await;
    let second_book = add_book(&schema, "Second", None).await;
    let sam = add_user(&schema, "Sam").await;
    let rosie = add_user(&schema, "Rosie").await;
    let comment = add_comment(&schema, "Moving", &first_book, &sam).await;

    let data = run_ok(
        &schema,
        format!(
            r#"mutation {{ updateComment(id: "{comment}", bookId: "{second_book}", userId: "{rosie}") {{
                head bookId userId book {{ title }} user {{ name }}
            }} }}"#
        ),
    )
    .await;
    assert_eq!(
        data["updateComment"],
        json!({
            "head": "Moving",
            "bookId": second_book,
            "userId": rosie,
            "book": {"title": "Second"},
            "user": {"name": "Rosie"},
        })
    );

    let data = run_ok(
        &schema,
        format!(
            r#"{{
                first: book(id: "{first_book}") {{ comments {{ id }} }}
                second: book(id: "{second_book}") {{ comments {{ id }} }}
                sam: user(id: "{sam}") {{ comments {{ id }} }}
                rosie: user(id: "{rosie}") {{ comments {{ id }} }}
            }}"#
        ),
    )
    .await;
    assert_eq!(data["first"]["comments"], json!([]));
    assert_eq!(data["second"]["comments"], json!([{"id": comment}]));
    assert_eq!(data["sam"]["comments"], json!([]));
    assert_eq!(data["rosie"]["comments"], json!([{"id": comment}]));

    // Only the supplied reference changes
    let data = run_ok(
        &schema,
        format!(
            r#"mutation {{ updateComment(id: "{comment}", bookId: "{first_book}") {{ bookId userId }} }}"#
        ),
    )
    .await;
    assert_eq!(
        data["updateComment"],
        json!({"bookId": first_book, "userId": rosie})
    );
}

#[tokio::test]
async fn test_updating_comment_with_malformed_reference_is_rejected() {
    let schema = memory_schema();
    let book = add_book(&schema, "Kept", None).await;
    let user = add_user(&schema, "Merry").await;
    let comment = add_comment(&schema, "Stays put", &book, &user).await;

    let outcome = run(
        &schema,
        format!(r#"mutation {{ updateComment(id: "{comment}", userId: "nope") {{ id }} }}"#),
    )
    .await;
    assert_eq!(outcome.error_codes(), vec!["INVALID_ID"]);
    assert_eq!(outcome.first_error_path(), "updateComment");
    assert_eq!(outcome.data, json!({"updateComment": null}));

    let data = run_ok(
        &schema,
        format!(r#"{{ comment(id: "{comment}") {{ userId }} }}"#),
    )
    .await;
    assert_eq!(data["comment"]["userId"], json!(user));
}

#[tokio::test]
async fn test_update_and_delete_of_missing_record_return_null() {
    let schema = memory_schema();
    let id = Uuid::new_v4();

    let data = run_ok(
        &schema,
        format!(
            r#"mutation {{
                updateUser(id: "{id}", name: "ghost") {{ id }}
                deleteUser(id: "{id}") {{ id }}
                updateComment(id: "{id}", head: "x") {{ id }}
                deleteComment(id: "{id}") {{ id }}
            }}"#
        ),
    )
    .await;
    assert_eq!(
        data,
        json!({"updateUser": null, "deleteUser": null, "updateComment": null, "deleteComment": null})
    );
}

#[tokio::test]
async fn test_delete_does_not_cascade() {
    let schema = memory_schema();
    let book = add_book(&schema, "Doomed", None).await;
    let reader = add_user(&schema, "Pippin").await;
    let comment = add_comment(&schema, "Orphaned soon", &book, &reader).await;

    let data = run_ok(
        &schema,
        format!(r#"mutation {{ deleteBook(id: "{book}") {{ id title }} deleteUser(id: "{reader}") {{ name }} }}"#),
    )
    .await;
    assert_eq!(data["deleteBook"], json!({"id": book, "title": "Doomed"}));
    assert_eq!(data["deleteUser"], json!({"name": "Pippin"}));

    let data = run_ok(
        &schema,
        format!(r#"{{ comment(id: "{comment}") {{ head bookId userId book {{ id }} user {{ id }} }} books {{ id }} }}"#),
    )
    .await;
    assert_eq!(
        data,
        json!({
            "comment": {
                "head": "Orphaned soon",
                "bookId": book,
                "userId": reader,
                "book": null,
                "user": null,
            },
            "books": [],
        })
    );
}

#[tokio::test]
async fn test_comment_references_are_not_checked() {
    let schema = memory_schema();
    let (book, user) = (Uuid::new_v4(), Uuid::new_v4());

    let data = run_ok(
        &schema,
        format!(
            r#"mutation {{ addComment(bookId: "{book}", userId: "{user}") {{ head body bookId book {{ id }} }} }}"#
        ),
    )
    .await;
    assert_eq!(
        data["addComment"],
        json!({"head": null, "body": null, "bookId": book.to_string(), "book": null})
    );
}

#[tokio::test]
async fn test_comment_requires_book_and_user_arguments() {
    let schema = memory_schema();

    let outcome = run(&schema, r#"mutation { addComment(head: "no refs") { id } }"#).await;
    assert!(!outcome.errors.is_empty());

    let data = run_ok(&schema, "{ comments { id } }").await;
    assert_eq!(data["comments"], json!([]));
}

#[tokio::test]
async fn test_malformed_id_is_a_field_error() {
    let schema = memory_schema();
    add_author(&schema, "Tolkien", "UK").await;

    let outcome = run(
        &schema,
        r#"{ broken: author(id: "not-an-id") { name } authors { name } }"#,
    )
    .await;

    assert_eq!(outcome.error_codes(), vec!["INVALID_ID"]);
    assert_eq!(outcome.first_error_path(), "broken");
    assert_eq!(outcome.errors[0].message, "invalid id: 'not-an-id'");
    assert_eq!(
        outcome.data,
        json!({"broken": null, "authors": [{"name": "Tolkien"}]})
    );
}

#[tokio::test]
async fn test_malformed_foreign_key_on_mutation_is_rejected() {
    let schema = memory_schema();

    let outcome = run(
        &schema,
        r#"mutation { addBook(title: "Bad ref", authorId: "42") { id } }"#,
    )
    .await;
    assert_eq!(outcome.error_codes(), vec!["INVALID_ID"]);
    assert_eq!(outcome.data, json!({"addBook": null}));

    let data = run_ok(&schema, "{ books { id } }").await;
    assert_eq!(data["books"], json!([]));
}

#[tokio::test]
async fn test_unavailable_store_reports_field_errors() {
    let schema = unavailable_schema();

    let outcome = run(&schema, "{ authors { id } author { id } }").await;
    assert_eq!(outcome.error_codes(), vec!["STORE_UNAVAILABLE"]);
    assert_eq!(outcome.first_error_path(), "authors");
    assert_eq!(outcome.errors[0].message, "document store unavailable");
    assert_eq!(outcome.data, json!({"authors": null, "author": null}));

    let outcome = run(&schema, r#"mutation { addUser(name: "nobody") { id } }"#).await;
    assert_eq!(outcome.error_codes(), vec!["STORE_UNAVAILABLE"]);
    assert_eq!(outcome.data, json!({"addUser": null}));
}

/// Delegates to memory, except one collection that is always unreachable
struct PartiallyDownStore {
    inner: MemoryDocumentStore,
    down: &'static str,
}

impl PartiallyDownStore {
    fn check(&self, collection: &str) -> StoreResult<()> {
        if collection == self.down {
            return Err(StoreError::Unavailable(format!("{collection} offline")));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PartiallyDownStore {
    fn backend(&self) -> &'static str {
        "partially-down"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<RawDocument>> {
        self.check(collection)?;
        self.inner.find_by_id(collection, id).await
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<RawDocument>> {
        self.check(collection)?;
        self.inner.find(collection, filter).await
    }

    async fn insert(&self, collection: &str, fields: Fields) -> StoreResult<RawDocument> {
        self.check(collection)?;
        self.inner.insert(collection, fields).await
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        patch: Fields,
    ) -> StoreResult<Option<RawDocument>> {
        self.check(collection)?;
        self.inner.update_by_id(collection, id, patch).await
    }

    async fn delete_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<RawDocument>> {
        self.check(collection)?;
        self.inner.delete_by_id(collection, id).await
    }
}

#[tokio::test]
async fn test_failed_relation_nulls_only_that_field() {
    let memory = MemoryDocumentStore::new();

    // Seed through a healthy view of the same data
    let healthy = build_schema(StoreRegistry::new(Arc::new(memory.clone())));
    let author = add_author(&healthy, "Tolkien", "UK").await;
    add_book(&healthy, "LOTR", Some(&author)).await;
    add_book(&healthy, "Silmarillion", Some(&author)).await;

    let degraded = build_schema(StoreRegistry::new(Arc::new(PartiallyDownStore {
        inner: memory,
        down: "authors",
    })));

    let outcome = run(&degraded, "{ books { title author { name } } }").await;

    assert_eq!(outcome.errors.len(), 2);
    assert!(outcome
        .error_codes()
        .iter()
        .all(|code| code == "STORE_UNAVAILABLE"));
    assert!(outcome.first_error_path().starts_with("books."));
    assert!(outcome.first_error_path().ends_with(".author"));

    assert_eq!(
        sorted_field(&outcome.data["books"], "title"),
        vec!["LOTR", "Silmarillion"]
    );
    for book in outcome.data["books"].as_array().unwrap() {
        assert_eq!(field(book, "author"), Some(&Value::Null));
    }

    // Every selected root field failing still leaves each key in place
    let outcome = run(&degraded, "{ authors { id } }").await;
    assert_eq!(outcome.error_codes(), vec!["STORE_UNAVAILABLE"]);
    assert_eq!(outcome.data, json!({"authors": null}));
}
