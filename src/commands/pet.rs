use super::Context;
use crate::{cli::PetCommand, render};
use anyhow::{anyhow, bail, Context as _};
use chrono::Utc;
use petcare_domain::date::parse_date;
use petcare_sdk::{
    CreatePetInput, PetForm, PhotoFile, UpdatePhotosInput, UploadPhotoInput, ID,
};
use std::path::{Path, PathBuf};

pub async fn run(command: PetCommand, ctx: &Context) -> anyhow::Result<()> {
    match command {
        PetCommand::Show { id, upcoming } => show(ctx, id, upcoming).await,
        PetCommand::Create {
            name,
            owner_id,
            breed,
            weight,
            birth_date,
        } => {
            let birth_date = birth_date.as_deref().map(parse_date).transpose()?;
            let input = CreatePetInput {
                name,
                breed,
                weight_kg: weight,
                birth_date,
                owner_id,
            };
            let pet_id = ctx.sdk.pet.create(input).await?;
            println!("Pet #{} created", pet_id);
            Ok(())
        }
        PetCommand::Update {
            id,
            name,
            breed,
            weight,
            birth_date,
        } => {
            let form = PetForm {
                name,
                breed,
                weight_kg: weight,
                birth_date,
            };
            let changes = form.into_changes()?;
            if changes.is_empty() {
                println!("Nothing to update");
                return Ok(());
            }
            ctx.sdk.pet.update(id, changes).await?;
            println!("Pet #{} updated", id);
            Ok(())
        }
        PetCommand::UploadPhoto {
            id,
            file,
            telegram_file_id,
        } => {
            let input = UploadPhotoInput {
                pet_id: id,
                photo: read_photo(&file)?,
                telegram_file_id,
            };
            let photo = ctx.sdk.pet.upload_photo(input).await?;
            println!("Photo #{} uploaded: {}", photo.id, photo.url);
            Ok(())
        }
        PetCommand::Photos { id, add, delete } => update_photos(ctx, id, add, delete).await,
    }
}

async fn show(ctx: &Context, pet_id: ID, upcoming_limit: usize) -> anyhow::Result<()> {
    let (pet, mut upcoming) =
        tokio::try_join!(ctx.sdk.pet.get(pet_id), ctx.sdk.event.upcoming(pet_id))?;
    let photo_urls = pet
        .photos
        .iter()
        .map(|photo| ctx.sdk.photo_url(photo))
        .collect::<Vec<_>>();
    let today = Utc::now().with_timezone(&ctx.timezone).date_naive();
    upcoming.truncate(upcoming_limit);

    println!("{}", render::pet_profile(&pet, &photo_urls, today));
    println!();
    println!(
        "{}",
        render::event_list(
            "Upcoming procedures",
            &upcoming,
            "No upcoming procedures",
            &ctx.timezone
        )
    );
    Ok(())
}

async fn update_photos(
    ctx: &Context,
    pet_id: ID,
    add: Vec<PathBuf>,
    delete: Vec<ID>,
) -> anyhow::Result<()> {
    if add.is_empty() && delete.is_empty() {
        bail!("Nothing to change, pass photos to --add or photo ids to --delete");
    }
    let pet = ctx.sdk.pet.get(pet_id).await?;
    if let Some(unknown) = delete
        .iter()
        .find(|photo_id| !pet.photos.iter().any(|p| p.id == **photo_id))
    {
        bail!("{} has no photo #{}", pet.name, unknown);
    }
    let new_files = add
        .iter()
        .map(|path| read_photo(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let (added, deleted) = (new_files.len(), delete.len());

    let input = UpdatePhotosInput {
        pet_id,
        new_files,
        delete_photo_ids: delete,
    };
    ctx.sdk.pet.update_photos(input, pet.photos.len()).await?;
    println!(
        "Photos of {} updated: {} added, {} deleted",
        pet.name, added, deleted
    );
    Ok(())
}

fn read_photo(path: &Path) -> anyhow::Result<PhotoFile> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("{} is not a file", path.display()))?;
    let bytes =
        std::fs::read(path).with_context(|| format!("Unable to read {}", path.display()))?;
    Ok(PhotoFile::new(file_name, bytes)?)
}
