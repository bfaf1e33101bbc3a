use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Player as returned by every read and write endpoint.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct PlayerDoc {
    pub id: i64,
    pub name: String,
    pub title: String,
    /// HUMAN | DWARF | ELF | GIANT | ORC | TROLL | HOBBIT
    pub race: String,
    /// WARRIOR | ROGUE | SORCERER | CLERIC | PALADIN | NAZGUL | WARLOCK | DRUID
    pub profession: String,
    /// epoch milliseconds
    pub birthday: i64,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
    pub banned: bool,
}

/// Create body (all fields but `banned` required) or update body (any subset).
#[derive(ToSchema)]
pub struct PlayerInputDoc {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<String>,
    pub profession: Option<String>,
    pub birthday: Option<i64>,
    pub experience: Option<i32>,
    pub banned: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::players::list_players,
        crate::routes::players::count_players,
        crate::routes::players::get_player,
        crate::routes::players::create_player,
        crate::routes::players::update_player,
        crate::routes::players::delete_player,
    ),
    components(
        schemas(
            HealthResponse,
            PlayerDoc,
            PlayerInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "players")
    )
)]
pub struct ApiDoc;
