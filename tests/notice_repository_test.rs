use schoolhouse::{
    domain::{CreateNoticeRequest, NoticeDraft},
    repository::{NoticeRepository, SqliteNoticeRepository},
};
use sqlx::SqlitePool;

fn draft(title: &str) -> NoticeDraft {
    NoticeDraft::from_request(CreateNoticeRequest {
        title: Some(title.to_string()),
        message: Some("message".to_string()),
        posted_by: "Head Teacher".to_string(),
        class: None,
        category: None,
        expiry: None,
        image: None,
    })
}

async fn test_repo() -> anyhow::Result<SqliteNoticeRepository> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(SqliteNoticeRepository::new(pool))
}

#[tokio::test]
async fn first_notice_gets_id_one() -> anyhow::Result<()> {
    let repo = test_repo().await?;

    let notice = repo.create(draft("First")).await?;
    assert_eq!(notice.id, 1);
    assert_eq!(notice.title, "First");
    assert_eq!(notice.class, "All Classes");
    assert_eq!(notice.category, "News");

    Ok(())
}

#[tokio::test]
async fn id_is_max_plus_one_over_surviving_ids() -> anyhow::Result<()> {
    let repo = test_repo().await?;

    // Build up ids {1..5}, then delete 2 and 4 so {1, 3, 5} remain.
    for i in 1..=5 {
        let notice = repo.create(draft(&format!("Notice {}", i))).await?;
        assert_eq!(notice.id, i as i64);
    }
    repo.delete(2).await?;
    repo.delete(4).await?;

    let notice = repo.create(draft("Sixth")).await?;
    assert_eq!(notice.id, 6);

    Ok(())
}

#[tokio::test]
async fn deleting_the_max_id_hands_it_out_again() -> anyhow::Result<()> {
    let repo = test_repo().await?;

    for i in 1..=6 {
        repo.create(draft(&format!("Notice {}", i))).await?;
    }
    repo.delete(6).await?;

    // Not 7: the id comes from the live maximum, not a counter.
    let notice = repo.create(draft("Replacement")).await?;
    assert_eq!(notice.id, 6);

    Ok(())
}

#[tokio::test]
async fn deleting_a_missing_id_is_a_no_op() -> anyhow::Result<()> {
    let repo = test_repo().await?;

    repo.create(draft("Only")).await?;
    repo.delete(42).await?;

    let notices = repo.list().await?;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Only");

    Ok(())
}

#[tokio::test]
async fn list_preserves_feed_order() -> anyhow::Result<()> {
    let repo = test_repo().await?;

    repo.create(draft("A")).await?;
    repo.create(draft("B")).await?;
    repo.create(draft("C")).await?;

    let titles: Vec<String> = repo.list().await?.into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);

    Ok(())
}
