use super::href;
use crate::error::Result;
use crate::schema::{Field, FieldType};
use crate::stream::{StreamDescriptor, StreamRegistry};

pub(super) fn register(registry: &mut StreamRegistry) -> Result<()> {
    registry.register(
        StreamDescriptor::builder("webinars", "/webinars")
            .description("Get a list of webinars")
            .primary_key("webinarId")
            .fields([
                Field::string("webinarId"),
                Field::string("name"),
                href(),
                Field::datetime("createdOn"),
                Field::datetime("startsOn"),
                Field::uri("webinarUrl").describe("The URL to the webinar room"),
                Field::string("status")
                    .allowed(["upcoming", "finished", "published", "unpublished"]),
                Field::string("type")
                    .describe("The webinar type")
                    .allowed(["all", "live", "on_demand"]),
                Field::array(
                    "campaigns",
                    FieldType::object([
                        Field::string("campaignId").required(),
                        Field::string("href"),
                        Field::string("name"),
                    ]),
                ),
                Field::array(
                    "newsletters",
                    FieldType::object([
                        Field::string("newsletterId").required(),
                        Field::string("href").required(),
                    ]),
                )
                .describe("The list of invitation messages"),
                Field::object(
                    "statistics",
                    [
                        Field::integer("registrants").required(),
                        Field::integer("visitors").required(),
                        Field::integer("attendees").required(),
                    ],
                ),
            ])
            .build()?,
    )?;

    Ok(())
}
