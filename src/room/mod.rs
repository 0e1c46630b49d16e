mod requests;
mod responses;

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use diesel::prelude::*;

use crate::{
    database::{assert, get_db_conn},
    models::appointments::APPOINT_STATUS_CANCELLED,
    models::rooms::{NewRoom, Room, UpdateRoom},
    models::users::{ROLE_ADMIN, ROLE_STAFF},
    protocol::{ListParams, SimpleResponse},
    query,
    session::{require_role, SessionClaims},
    DbPool,
};

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(all_rooms)
        .service(create_room)
        .service(update_room)
        .service(delete_room);
}

crate::list_funcs! {
    (all_rooms, "/all", RoomListResponse),
}

crate::auth_post_funcs! {
    (create_room, "/create", CreateRoomRequest, SimpleResponse),
}

crate::id_body_funcs! {
    (put, update_room, "/update/{id}", UpdateRoomRequest, SimpleResponse),
}

crate::id_funcs! {
    (delete, delete_room, "/delete/{id}", SimpleResponse),
}

async fn all_rooms_impl(
    pool: web::Data<DbPool>,
    _claims: SessionClaims,
    params: ListParams,
) -> anyhow::Result<RoomListResponse> {
    use crate::schema::rooms;

    let conn = get_db_conn(&pool)?;
    let items = web::block(move || rooms::table.load::<Room>(&conn))
        .await
        .context("DB error")?;

    let items = items
        .into_iter()
        .map(|room| RoomItem {
            rid: room.rid,
            room_name: room.room_name,
            room_type: room.room_type,
            capacity: room.capacity,
            is_available: room.is_available,
        })
        .collect();

    Ok(RoomListResponse {
        success: true,
        err: "".to_string(),
        rooms: query::apply(items, &params),
    })
}

async fn create_room_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    info: web::Json<CreateRoomRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::rooms;

    require_role(&claims, &[ROLE_ADMIN, ROLE_STAFF])?;
    let info = info.into_inner();
    if info.room_name.trim().is_empty() {
        bail!("Room name is required");
    }
    if info.capacity < 0 {
        bail!("Capacity must not be negative");
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let dup = rooms::table
                .filter(rooms::room_name.eq(&info.room_name))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if dup > 0 {
                bail!("Room name already taken");
            }

            let data = NewRoom {
                room_name: info.room_name,
                room_type: info.room_type,
                capacity: info.capacity,
                is_available: info.is_available,
            };
            diesel::insert_into(rooms::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn update_room_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    rid: u64,
    info: web::Json<UpdateRoomRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::rooms;

    require_role(&claims, &[ROLE_ADMIN, ROLE_STAFF])?;
    assert::assert_room(&pool, rid).await?;

    let info = info.into_inner();
    let data = UpdateRoom {
        room_name: info.room_name,
        room_type: info.room_type,
        capacity: info.capacity,
        is_available: info.is_available,
    };
    if data.room_name.is_none()
        && data.room_type.is_none()
        && data.capacity.is_none()
        && data.is_available.is_none()
    {
        bail!("Nothing to update");
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::update(rooms::table.filter(rooms::rid.eq(rid)))
            .set(&data)
            .execute(&conn)
    })
    .await
    .context("DB error")?;

    Ok(SimpleResponse::ok())
}

async fn delete_room_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    rid: u64,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{appointments, rooms};

    require_role(&claims, &[ROLE_ADMIN, ROLE_STAFF])?;
    assert::assert_room(&pool, rid).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let in_use = appointments::table
                .filter(appointments::rid.eq(rid))
                .filter(appointments::status.ne(APPOINT_STATUS_CANCELLED))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if in_use > 0 {
                bail!("Room still has booked appointments");
            }

            diesel::delete(rooms::table.filter(rooms::rid.eq(rid)))
                .execute(&conn)
                .context("DB error")?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}
