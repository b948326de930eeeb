pub use twilight_model::channel;
pub use twilight_model::gateway;
pub use twilight_model::guild;
pub use twilight_model::id;
pub use twilight_model::user;

use twilight_model::id::{marker::*, Id};

pub type ChannelId = Id<ChannelMarker>;
pub type GuildId = Id<GuildMarker>;
pub type RoleId = Id<RoleMarker>;
pub type UserId = Id<UserMarker>;
