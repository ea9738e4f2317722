use super::href;
use crate::context::ContextProjection;
use crate::error::Result;
use crate::schema::Field;
use crate::stream::{StreamDescriptor, StreamRegistry};

pub(super) fn register(registry: &mut StreamRegistry) -> Result<()> {
    registry.register(
        StreamDescriptor::builder("sms", "/sms")
            .description("Get the list of SMS messages")
            .primary_key("smsId")
            // No child streams yet; the projection is ready for SMS sub-resources.
            .child_context(ContextProjection::key("smsId"))
            .fields([
                Field::string("smsId")
                    .required()
                    .describe("The SMS message ID"),
                href().required(),
                Field::string("name").describe("The SMS message name"),
                Field::object(
                    "campaign",
                    [
                        Field::string("campaignId").required().describe("Campaign ID"),
                        Field::string("name").describe("The campaign name"),
                    ],
                ),
                Field::datetime("modifiedOn").describe(
                    "The date the SMS message was last modified on, shown in ISO 8601 date and time format",
                ),
                Field::string("type")
                    .allowed(["sms", "draft"])
                    .describe("The SMS message type"),
                Field::object(
                    "sendOn",
                    [Field::datetime("date")
                        .describe("Send date. Shown in format ISO 8601 without timezone offset")],
                ),
                Field::string("recipientsType")
                    .allowed(["contacts", "importedNumbers"])
                    .describe("Type of SMS message recipients"),
                Field::string("senderName").describe("The SMS message sender name"),
                Field::string("content").describe("The SMS message content"),
                Field::object(
                    "sendMetrics",
                    [
                        Field::string("progress").describe("Sending progress"),
                        Field::string("status")
                            .allowed(["scheduled", "sending", "sent"])
                            .describe("Sending status"),
                    ],
                )
                .describe("Information about sending process"),
                Field::object(
                    "statistics",
                    [
                        Field::integer("sent").describe("Number of sent messages"),
                        Field::integer("delivered").describe("Number of delivered messages"),
                        Field::integer("clicks").describe("Number of clicked messages"),
                    ],
                )
                .describe("Message statistics"),
            ])
            .build()?,
    )?;

    Ok(())
}
