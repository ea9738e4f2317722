use super::href;
use crate::context::ContextProjection;
use crate::decode::RecordShape;
use crate::error::Result;
use crate::schema::Field;
use crate::stream::{StreamDescriptor, StreamRegistry};

pub(super) fn register(registry: &mut StreamRegistry) -> Result<()> {
    let campaigns = registry.register(
        StreamDescriptor::builder("campaigns", "/campaigns")
            .description("Get a list of campaigns")
            .primary_key("campaignId")
            .child_context(ContextProjection::key("campaignId"))
            .fields([
                Field::string("description")
                    .describe("same as the campaign name, kept for compatibility reasons"),
                Field::string("campaignId").describe("Campaign ID"),
                Field::string("name").describe("The campaign (list) name."),
                Field::string("techName")
                    .describe("Unique internal ID of a list used for FTP imports"),
                Field::string("languageCode")
                    .describe("The campaign language code according to ISO 639-1"),
                Field::boolean("isDefault").describe("Is the campaign default"),
                Field::datetime("createdOn").describe("The date of creation"),
                href(),
            ])
            .build()?,
    )?;

    let from_field = [
        Field::string("fromFieldId")
            .required()
            .describe("The 'From' address ID"),
        href(),
    ];

    registry.register(
        StreamDescriptor::builder("campaign_details", "/campaigns/{campaignId}")
            .description("Get a single campaign by the campaign ID")
            .parent(&campaigns)
            .shape(RecordShape::Object)
            .inject_context()
            .primary_key("campaignId")
            .fields([
                Field::string("campaignId").describe("Campaign ID"),
                Field::string("name")
                    .required()
                    .describe("The campaign (list) name."),
                Field::object(
                    "confirmation",
                    [
                        Field::object("fromField", from_field),
                        Field::string("mimeType")
                            .describe("The MIME type for the confirmation message"),
                        Field::uri("redirectUrl").describe(
                            "The URL a subscriber will be redirected to if the redirectType is set to customUrl",
                        ),
                    ],
                ),
            ])
            .build()?,
    )?;

    Ok(())
}
