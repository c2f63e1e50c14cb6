use desk_macros::view;

/// Subreddit image feed, picked from for reposting.
#[view(title = "Feed Importer", summary = "Subreddit image posts available for reposting")]
#[derive(Debug, Default)]
pub struct FeedImporter;
