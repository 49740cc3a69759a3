//! Built-in catalog of IRS forms

use super::model::{FieldType, FormCategory, FormField, FormSchema, FormSection, SelectOption};
use super::registry::{SchemaError, SchemaRegistry};

const SSN_PATTERN: &str = r"^\d{3}-\d{2}-\d{4}$";
const EIN_PATTERN: &str = r"^\d{2}-\d{7}$";
const ZIP_PATTERN: &str = r"^\d{5}(-\d{4})?$";
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const PHONE_PATTERN: &str = r"^\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}$";
const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";
const YEAR_PATTERN: &str = r"^(19|20)\d{2}$";

/// Build the registry of every built-in form
pub fn builtin_registry() -> Result<SchemaRegistry, SchemaError> {
    SchemaRegistry::new(builtin_schemas())
}

/// Built-in schemas in catalog order
fn builtin_schemas() -> Vec<FormSchema> {
    vec![
        w9(),
        w4(),
        w2(),
        f1099_nec(),
        f1099_misc(),
        f1099_int(),
        f8821(),
        f2848(),
        ss4(),
    ]
}

fn irs(path: &str) -> String {
    format!("https://www.irs.gov/{path}")
}

fn ssn(id: &str, label: &str) -> FormField {
    FormField::new(id, label, FieldType::Ssn)
        .placeholder("XXX-XX-XXXX")
        .pattern(SSN_PATTERN, "Enter a 9-digit SSN")
}

fn ein(id: &str, label: &str) -> FormField {
    FormField::new(id, label, FieldType::Ein)
        .placeholder("XX-XXXXXXX")
        .pattern(EIN_PATTERN, "Enter a 9-digit EIN")
}

/// Let an optional field be left blank while keeping its pattern for
/// anything typed
fn allow_blank(mut field: FormField) -> FormField {
    if let Some(pattern) = field.validation.as_mut().and_then(|r| r.pattern.as_mut()) {
        *pattern = format!("^$|{pattern}");
    }
    field
}

fn money(id: &str, label: &str) -> FormField {
    FormField::new(id, label, FieldType::Currency)
        .placeholder("0.00")
        .range(Some(0.0), None)
}

fn zip(id: &str) -> FormField {
    FormField::new(id, "ZIP code", FieldType::Text)
        .placeholder("12345")
        .pattern(ZIP_PATTERN, "Enter a 5-digit ZIP or ZIP+4")
}

fn address_fields(prefix: &str) -> Vec<FormField> {
    vec![
        FormField::new(&format!("{prefix}Address"), "Street address", FieldType::Text).required(),
        FormField::new(&format!("{prefix}City"), "City", FieldType::Text).required(),
        FormField::new(&format!("{prefix}State"), "State", FieldType::Text)
            .required()
            .placeholder("CA")
            .pattern(r"^[A-Z]{2}$", "Use the two-letter state code"),
        zip(&format!("{prefix}Zip")).required(),
    ]
}

fn address_ids(prefix: &str) -> Vec<String> {
    ["Address", "City", "State", "Zip"]
        .iter()
        .map(|suffix| format!("{prefix}{suffix}"))
        .collect()
}

fn section(title: &str, ids: &[&str]) -> FormSection {
    FormSection::new(title, ids)
}

fn section_with(title: &str, ids: &[&str], extra: Vec<String>) -> FormSection {
    let mut section = FormSection::new(title, ids);
    section.field_ids.extend(extra);
    section
}

fn w9() -> FormSchema {
    let mut fields = vec![
        FormField::new("name", "Name (as shown on your income tax return)", FieldType::Text)
            .required(),
        FormField::new("businessName", "Business name, if different", FieldType::Text),
        FormField::select(
            "taxClassification",
            "Federal tax classification",
            vec![
                SelectOption::new("individual", "Individual/sole proprietor"),
                SelectOption::new("c_corp", "C corporation"),
                SelectOption::new("s_corp", "S corporation"),
                SelectOption::new("partnership", "Partnership"),
                SelectOption::new("trust", "Trust/estate"),
                SelectOption::new("llc", "Limited liability company"),
            ],
        )
        .required(),
        allow_blank(
            FormField::new("exemptPayeeCode", "Exempt payee code", FieldType::Text)
                .pattern(r"^([1-9]|1[0-3])$", "Exempt payee codes run from 1 to 13"),
        ),
    ];
    fields.extend(address_fields(""));
    fields.extend([
        allow_blank(
            ssn("ssn", "Social security number")
                .help("Individuals and sole proprietors enter an SSN; entities enter an EIN"),
        ),
        allow_blank(ein("ein", "Employer identification number")),
        FormField::new(
            "certify",
            "I certify the information above under penalties of perjury",
            FieldType::Checkbox,
        )
        .required(),
        FormField::new("signatureDate", "Date", FieldType::Date)
            .required()
            .placeholder("YYYY-MM-DD")
            .pattern(DATE_PATTERN, "Use YYYY-MM-DD"),
    ]);

    FormSchema {
        id: "w9".to_string(),
        title: "Form W-9".to_string(),
        category: FormCategory::Business,
        description: "Request for Taxpayer Identification Number and Certification".to_string(),
        reference_link: Some(irs("forms-pubs/about-form-w-9")),
        fields,
        sections: Some(vec![
            section(
                "Identification",
                &["name", "businessName", "taxClassification", "exemptPayeeCode"],
            ),
            section_with("Address", &[], address_ids("")),
            section("Taxpayer Identification Number", &["ssn", "ein"]),
            section("Certification", &["certify", "signatureDate"]),
        ]),
    }
}

fn w4() -> FormSchema {
    let mut fields = vec![
        FormField::new("firstName", "First name and middle initial", FieldType::Text).required(),
        FormField::new("lastName", "Last name", FieldType::Text).required(),
        ssn("ssn", "Social security number").required(),
    ];
    fields.extend(address_fields(""));
    fields.extend([
        FormField::select(
            "filingStatus",
            "Filing status",
            vec![
                SelectOption::new("single", "Single or Married filing separately"),
                SelectOption::new("joint", "Married filing jointly"),
                SelectOption::new("head", "Head of household"),
            ],
        )
        .required(),
        FormField::new("multipleJobs", "Multiple jobs or spouse works", FieldType::Checkbox)
            .help("Check if you hold more than one job at a time"),
        FormField::new(
            "qualifyingChildren",
            "Number of qualifying children under 17",
            FieldType::Number,
        )
        .range(Some(0.0), Some(20.0)),
        FormField::new("otherDependents", "Number of other dependents", FieldType::Number)
            .range(Some(0.0), Some(20.0)),
        money("otherIncome", "Other income (not from jobs)"),
        money("deductions", "Deductions"),
        money("extraWithholding", "Extra withholding per pay period"),
        FormField::new("exempt", "Claim exemption from withholding", FieldType::Checkbox),
    ]);

    FormSchema {
        id: "w4".to_string(),
        title: "Form W-4".to_string(),
        category: FormCategory::Employment,
        description: "Employee's Withholding Certificate".to_string(),
        reference_link: Some(irs("forms-pubs/about-form-w-4")),
        fields,
        sections: Some(vec![
            section_with(
                "Step 1: Personal Information",
                &["firstName", "lastName", "ssn"],
                address_ids(""),
            ),
            section("Filing Status", &["filingStatus", "multipleJobs"]),
            section("Step 3: Dependents", &["qualifyingChildren", "otherDependents"]),
            section(
                "Step 4: Other Adjustments",
                &["otherIncome", "deductions", "extraWithholding", "exempt"],
            ),
        ]),
    }
}

fn w2() -> FormSchema {
    FormSchema {
        id: "w2".to_string(),
        title: "Form W-2".to_string(),
        category: FormCategory::Employment,
        description: "Wage and Tax Statement".to_string(),
        reference_link: Some(irs("forms-pubs/about-form-w-2")),
        fields: vec![
            ssn("employeeSsn", "a. Employee's social security number").required(),
            ein("employerEin", "b. Employer identification number").required(),
            FormField::new("employerName", "c. Employer's name and address", FieldType::Textarea)
                .required(),
            FormField::new("employeeName", "e. Employee's name", FieldType::Text).required(),
            money("wages", "1. Wages, tips, other compensation").required(),
            money("federalWithheld", "2. Federal income tax withheld"),
            money("ssWages", "3. Social security wages"),
            money("ssWithheld", "4. Social security tax withheld"),
            money("medicareWages", "5. Medicare wages and tips"),
            money("medicareWithheld", "6. Medicare tax withheld"),
            FormField::new("retirementPlan", "13. Retirement plan", FieldType::Checkbox),
            allow_blank(
                FormField::new("state", "15. State", FieldType::Text)
                    .pattern(r"^[A-Z]{2}$", "Use the two-letter state code"),
            ),
            money("stateWages", "16. State wages, tips, etc."),
            money("stateWithheld", "17. State income tax"),
        ],
        sections: Some(vec![
            section(
                "Employer and Employee",
                &["employeeSsn", "employerEin", "employerName", "employeeName"],
            ),
            section(
                "Federal",
                &[
                    "wages",
                    "federalWithheld",
                    "ssWages",
                    "ssWithheld",
                    "medicareWages",
                    "medicareWithheld",
                    "retirementPlan",
                ],
            ),
            section("State", &["state", "stateWages", "stateWithheld"]),
        ]),
    }
}

fn payer_recipient_fields() -> Vec<FormField> {
    vec![
        FormField::new("payerName", "Payer's name, address and phone", FieldType::Textarea)
            .required(),
        ein("payerTin", "Payer's TIN").required(),
        ssn("recipientTin", "Recipient's TIN").required(),
        FormField::new("recipientName", "Recipient's name", FieldType::Text).required(),
        FormField::new("accountNumber", "Account number", FieldType::Text),
    ]
}

fn tax_year() -> FormField {
    FormField::new("taxYear", "Tax year", FieldType::Number)
        .required()
        .placeholder("2024")
        .range(Some(1990.0), Some(2100.0))
        .pattern(YEAR_PATTERN, "Enter a four-digit year")
}

fn f1099_nec() -> FormSchema {
    let mut fields = vec![tax_year()];
    fields.extend(payer_recipient_fields());
    fields.extend([
        money("nonemployeeComp", "1. Nonemployee compensation").required(),
        FormField::new("directSales", "2. Direct sales of $5,000 or more", FieldType::Checkbox),
        money("federalWithheld", "4. Federal income tax withheld"),
    ]);

    FormSchema {
        id: "1099-nec".to_string(),
        title: "Form 1099-NEC".to_string(),
        category: FormCategory::Income,
        description: "Nonemployee Compensation".to_string(),
        reference_link: Some(irs("forms-pubs/about-form-1099-nec")),
        fields,
        sections: None,
    }
}

fn f1099_misc() -> FormSchema {
    let mut fields = vec![tax_year()];
    fields.extend(payer_recipient_fields());
    fields.extend([
        money("rents", "1. Rents"),
        money("royalties", "2. Royalties"),
        money("otherIncome", "3. Other income"),
        money("federalWithheld", "4. Federal income tax withheld"),
        money("medicalPayments", "6. Medical and health care payments"),
        FormField::new("fatca", "FATCA filing requirement", FieldType::Checkbox),
    ]);

    FormSchema {
        id: "1099-misc".to_string(),
        title: "Form 1099-MISC".to_string(),
        category: FormCategory::Income,
        description: "Miscellaneous Information".to_string(),
        reference_link: Some(irs("forms-pubs/about-form-1099-misc")),
        fields,
        sections: None,
    }
}

fn f1099_int() -> FormSchema {
    let mut fields = vec![tax_year()];
    fields.extend(payer_recipient_fields());
    fields.extend([
        money("interestIncome", "1. Interest income").required(),
        money("earlyWithdrawalPenalty", "2. Early withdrawal penalty"),
        money("treasuryInterest", "3. Interest on U.S. Savings Bonds and Treasury obligations"),
        money("federalWithheld", "4. Federal income tax withheld"),
        money("taxExemptInterest", "8. Tax-exempt interest"),
    ]);

    FormSchema {
        id: "1099-int".to_string(),
        title: "Form 1099-INT".to_string(),
        category: FormCategory::Income,
        description: "Interest Income".to_string(),
        reference_link: Some(irs("forms-pubs/about-form-1099-int")),
        fields,
        sections: None,
    }
}

fn f8821() -> FormSchema {
    FormSchema {
        id: "8821".to_string(),
        title: "Form 8821".to_string(),
        category: FormCategory::Authorization,
        description: "Tax Information Authorization".to_string(),
        reference_link: Some(irs("forms-pubs/about-form-8821")),
        fields: vec![
            FormField::new("taxpayerName", "Taxpayer name", FieldType::Text).required(),
            ssn("taxpayerTin", "Taxpayer identification number").required(),
            allow_blank(
                FormField::new("taxpayerPhone", "Daytime telephone", FieldType::Phone)
                    .pattern(PHONE_PATTERN, "Enter a 10-digit phone number"),
            ),
            FormField::new("designeeName", "Designee name", FieldType::Text).required(),
            allow_blank(
                FormField::new("designeeEmail", "Designee email", FieldType::Email)
                    .pattern(EMAIL_PATTERN, "Enter a valid email address"),
            ),
            FormField::new("designeeCaf", "CAF number", FieldType::Text)
                .help("Centralized Authorization File number, if the designee has one")
                .link(&irs("tax-professionals/caf-number")),
            FormField::select(
                "taxMatter",
                "Type of tax information",
                vec![
                    SelectOption::new("income", "Income"),
                    SelectOption::new("employment", "Employment"),
                    SelectOption::new("excise", "Excise"),
                    SelectOption::new("civil_penalty", "Civil penalty"),
                ],
            )
            .required(),
            FormField::new("taxForm", "Tax form number", FieldType::Text)
                .required()
                .placeholder("1040"),
            FormField::new("years", "Year(s) or period(s)", FieldType::Text).required(),
            FormField::new("specificMatters", "Specific tax matters", FieldType::Textarea),
            FormField::new("signature", "I authorize the designee named above", FieldType::Checkbox)
                .required(),
        ],
        sections: Some(vec![
            section("Taxpayer", &["taxpayerName", "taxpayerTin", "taxpayerPhone"]),
            section("Designee", &["designeeName", "designeeEmail", "designeeCaf"]),
            section(
                "Tax Information",
                &["taxMatter", "taxForm", "years", "specificMatters"],
            ),
            section("Signature", &["signature"]),
        ]),
    }
}

fn f2848() -> FormSchema {
    FormSchema {
        id: "2848".to_string(),
        title: "Form 2848".to_string(),
        category: FormCategory::Authorization,
        description: "Power of Attorney and Declaration of Representative".to_string(),
        reference_link: Some(irs("forms-pubs/about-form-2848")),
        fields: vec![
            FormField::new("taxpayerName", "Taxpayer name and address", FieldType::Textarea)
                .required(),
            ssn("taxpayerTin", "Taxpayer identification number").required(),
            FormField::new(
                "representativeName",
                "Representative name and address",
                FieldType::Textarea,
            )
            .required(),
            FormField::new("representativePhone", "Representative telephone", FieldType::Phone)
                .required()
                .pattern(PHONE_PATTERN, "Enter a 10-digit phone number"),
            FormField::select(
                "designation",
                "Representative designation",
                vec![
                    SelectOption::new("a", "Attorney"),
                    SelectOption::new("b", "Certified Public Accountant"),
                    SelectOption::new("c", "Enrolled Agent"),
                    SelectOption::new("h", "Family member"),
                ],
            )
            .required(),
            FormField::new("taxMatters", "Description of matter", FieldType::Textarea).required(),
            FormField::new("years", "Year(s) or period(s)", FieldType::Text).required(),
            FormField::new("retainPrior", "Retain prior powers of attorney", FieldType::Checkbox),
            FormField::new("signature", "I grant the powers described above", FieldType::Checkbox)
                .required(),
        ],
        sections: None,
    }
}

fn ss4() -> FormSchema {
    let mut fields = vec![
        FormField::new("legalName", "Legal name of entity", FieldType::Text).required(),
        FormField::new("tradeName", "Trade name of business", FieldType::Text),
        FormField::new("responsibleParty", "Name of responsible party", FieldType::Text).required(),
        ssn("responsibleSsn", "Responsible party SSN").required(),
    ];
    fields.extend(address_fields("mailing"));
    fields.extend([
        FormField::select(
            "entityType",
            "Type of entity",
            vec![
                SelectOption::new("sole_proprietor", "Sole proprietor"),
                SelectOption::new("partnership", "Partnership"),
                SelectOption::new("corporation", "Corporation"),
                SelectOption::new("llc", "Limited liability company"),
                SelectOption::new("nonprofit", "Other nonprofit organization"),
            ],
        )
        .required(),
        FormField::new("startDate", "Date business started", FieldType::Date)
            .required()
            .placeholder("YYYY-MM-DD")
            .pattern(DATE_PATTERN, "Use YYYY-MM-DD"),
        FormField::new("employees", "Highest number of employees expected", FieldType::Number)
            .range(Some(0.0), None),
        FormField::new("principalActivity", "Principal activity", FieldType::Textarea),
        allow_blank(
            FormField::new("contactPhone", "Telephone number", FieldType::Phone)
                .pattern(PHONE_PATTERN, "Enter a 10-digit phone number"),
        ),
        allow_blank(
            FormField::new("contactEmail", "Email", FieldType::Email)
                .pattern(EMAIL_PATTERN, "Enter a valid email address"),
        ),
    ]);

    FormSchema {
        id: "ss4".to_string(),
        title: "Form SS-4".to_string(),
        category: FormCategory::Business,
        description: "Application for Employer Identification Number".to_string(),
        reference_link: Some(irs("forms-pubs/about-form-ss-4")),
        fields,
        sections: Some(vec![
            section(
                "Entity",
                &["legalName", "tradeName", "responsibleParty", "responsibleSsn"],
            ),
            section_with("Mailing Address", &[], address_ids("mailing")),
            section(
                "Business Details",
                &["entityType", "startDate", "employees", "principalActivity"],
            ),
            section("Contact", &["contactPhone", "contactEmail"]),
        ]),
    }
}
