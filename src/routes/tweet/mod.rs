mod handler;
mod model;

pub use handler::{create_tweet, get_user_tweets};
pub use model::{CreateTweetRequest, MAX_TWEET_CHARS, Tweet, TweetError, validate_content};
