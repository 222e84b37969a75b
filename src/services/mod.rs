/// Dispatch of feed events to the board controllers.
pub mod board_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Clients of the score and final feeds.
pub mod feed_client;
/// Swap-sequence planning between two orders.
pub mod planner;
/// Feed polling loops.
pub mod poller;
/// Race simulation controller.
pub mod race_service;
/// Ranking calculator.
pub mod ranking;
/// Final countdown controller.
pub mod reveal_service;
/// Animation scheduler driving the render surface.
pub mod scheduler;
/// Feed server scoreboard operations.
pub mod scoreboard_service;
