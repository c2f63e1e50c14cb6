use desk_macros::view;

#[view(title = "Calendar", summary = "Posts scheduled for publishing")]
#[derive(Debug, Default)]
pub struct ScheduledPosts;
